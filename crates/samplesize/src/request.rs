//! YAML calculation requests
//!
//! A request describes one estimate plus optional sweeps and an optional
//! reference table:
//!
//! ```yaml
//! confidence_level: 95
//! margin_of_error: 0.05
//! proportion: 0.5
//! population_size: 10000
//! sweeps:
//!   - dimension: margin_of_error
//!   - dimension: proportion
//!     values: [0.1, 0.3, 0.5]
//! table:
//!   confidence_levels: [90, 95, 99]
//!   margins: [0.01, 0.03, 0.05]
//! ```
//!
//! Sweep ranges use explicit optional fields rather than a tagged enum to keep
//! the YAML flat.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use samplesize_core::model::ConfidenceLevel;
use samplesize_core::sensitivity::{
    FixedInputs, QUICK_REFERENCE_LEVELS, QUICK_REFERENCE_MARGINS, SweepDimension, SweepRange,
};
use serde::{Deserialize, Serialize};

/// A full calculation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationRequest {
    pub confidence_level: ConfidenceLevel,
    /// Fraction, e.g. `0.05`
    pub margin_of_error: f64,
    pub proportion: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_size: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sweeps: Vec<SweepRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableRequest>,
}

impl Default for CalculationRequest {
    fn default() -> Self {
        let fixed = FixedInputs::default();
        Self {
            confidence_level: fixed.confidence_level,
            margin_of_error: fixed.margin_of_error,
            proportion: fixed.proportion,
            population_size: fixed.population_size,
            sweeps: Vec::new(),
            table: None,
        }
    }
}

impl CalculationRequest {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Read and parse a request file
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read request file {}", path.display()))?;
        Self::from_yaml(&content)
            .map_err(|e| eyre!("failed to parse request file {}: {e}", path.display()))
    }

    /// The estimate inputs, used as the fixed values of every sweep
    pub fn fixed_inputs(&self) -> FixedInputs {
        FixedInputs {
            confidence_level: self.confidence_level,
            margin_of_error: self.margin_of_error,
            proportion: self.proportion,
            population_size: self.population_size,
        }
    }
}

/// One sweep of a request. Without `values` or a `min`/`max`/`steps` triple
/// the dimension's default values are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRequest {
    pub dimension: SweepDimension,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
}

impl SweepRequest {
    pub fn new(dimension: SweepDimension) -> Self {
        Self {
            dimension,
            values: None,
            min: None,
            max: None,
            steps: None,
        }
    }

    /// Explicit values take precedence over a linear range
    pub fn range(&self) -> color_eyre::Result<SweepRange> {
        if let Some(values) = &self.values {
            return Ok(SweepRange::Values(values.clone()));
        }
        match (self.min, self.max, self.steps) {
            (None, None, None) => Ok(SweepRange::Default),
            (Some(min), Some(max), Some(steps)) => Ok(SweepRange::Linear { min, max, steps }),
            _ => Err(eyre!(
                "{} sweep needs all of min, max and steps, or none of them",
                self.dimension
            )),
        }
    }
}

/// Reference table section of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRequest {
    pub confidence_levels: Vec<ConfidenceLevel>,
    /// Fractions, e.g. `0.01`
    pub margins: Vec<f64>,
    pub proportion: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_size: Option<i64>,
}

impl Default for TableRequest {
    fn default() -> Self {
        Self {
            confidence_levels: QUICK_REFERENCE_LEVELS.to_vec(),
            margins: QUICK_REFERENCE_MARGINS.to_vec(),
            proportion: 0.5,
            population_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let request = CalculationRequest::from_yaml("{}").unwrap();
        assert_eq!(request, CalculationRequest::default());
        assert_eq!(request.confidence_level, ConfidenceLevel::NinetyFive);
        assert_eq!(request.margin_of_error, 0.05);
        assert!(request.sweeps.is_empty());
        assert!(request.table.is_none());
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
confidence_level: 99
margin_of_error: 0.03
proportion: 0.4
population_size: 20000
sweeps:
  - dimension: margin_of_error
  - dimension: proportion
    values: [0.1, 0.3, 0.5]
  - dimension: confidence_level
    min: 90
    max: 95
    steps: 2
table:
  confidence_levels: [90, 99.9]
  margins: [0.01, 0.05]
"#;
        let request = CalculationRequest::from_yaml(yaml).unwrap();

        assert_eq!(request.confidence_level, ConfidenceLevel::NinetyNine);
        assert_eq!(request.population_size, Some(20_000));
        assert_eq!(request.sweeps.len(), 3);
        assert_eq!(request.sweeps[0].range().unwrap(), SweepRange::Default);
        assert_eq!(
            request.sweeps[1].range().unwrap(),
            SweepRange::Values(vec![0.1, 0.3, 0.5])
        );
        assert_eq!(
            request.sweeps[2].range().unwrap(),
            SweepRange::Linear {
                min: 90.0,
                max: 95.0,
                steps: 2
            }
        );

        let table = request.table.unwrap();
        assert_eq!(
            table.confidence_levels,
            vec![
                ConfidenceLevel::Ninety,
                ConfidenceLevel::NinetyNinePointNine
            ]
        );
        assert_eq!(table.margins, vec![0.01, 0.05]);
        assert_eq!(table.proportion, 0.5);
    }

    #[test]
    fn test_unknown_confidence_level_rejected() {
        assert!(CalculationRequest::from_yaml("confidence_level: 85").is_err());
    }

    #[test]
    fn test_partial_linear_range_rejected() {
        let sweep = SweepRequest {
            min: Some(0.01),
            ..SweepRequest::new(SweepDimension::MarginOfError)
        };
        assert!(sweep.range().is_err());
    }

    #[test]
    fn test_yaml_roundtrip_preserves_request() {
        let request = CalculationRequest {
            population_size: Some(5_000),
            sweeps: vec![SweepRequest::new(SweepDimension::Proportion)],
            table: Some(TableRequest::default()),
            ..Default::default()
        };
        let yaml = request.to_yaml().unwrap();
        assert_eq!(CalculationRequest::from_yaml(&yaml).unwrap(), request);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "margin_of_error: 0.03\nproportion: 0.5").unwrap();

        let request = CalculationRequest::load(file.path()).unwrap();
        assert_eq!(request.margin_of_error, 0.03);

        let missing = CalculationRequest::load(Path::new("/nonexistent/request.yaml"));
        assert!(missing.is_err());
    }
}
