//! Validated calculation inputs
//!
//! Each newtype can only be constructed through validation, so an
//! [`EstimateInputs`] value is always safe to feed into the formulas.

use serde::{Deserialize, Serialize};

use super::ConfidenceLevel;
use crate::error::{InvalidParameter, InvalidReason, Parameter};

/// Half-width of the confidence interval, as a fraction strictly inside (0, 1)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MarginOfError(f64);

impl MarginOfError {
    pub fn new(value: f64) -> Result<Self, InvalidParameter> {
        if !value.is_finite() {
            return Err(InvalidParameter::not_finite(Parameter::MarginOfError, value));
        }
        if value <= 0.0 || value >= 1.0 {
            return Err(InvalidParameter::out_of_range(
                Parameter::MarginOfError,
                value,
                "0 < e < 1",
            ));
        }
        Ok(Self(value))
    }

    /// Build from a percent, e.g. `5.0` for a 5% margin
    pub fn from_percent(percent: f64) -> Result<Self, InvalidParameter> {
        Self::new(percent / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for MarginOfError {
    fn default() -> Self {
        Self(0.05)
    }
}

impl TryFrom<f64> for MarginOfError {
    type Error = InvalidParameter;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MarginOfError> for f64 {
    fn from(margin: MarginOfError) -> Self {
        margin.0
    }
}

/// Estimated fraction of the population with the attribute, in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Proportion(f64);

impl Proportion {
    /// Maximum-variance assumption
    pub const MOST_CONSERVATIVE: Proportion = Proportion(0.5);

    pub fn new(value: f64) -> Result<Self, InvalidParameter> {
        if value.is_nan() {
            return Err(InvalidParameter::not_finite(Parameter::Proportion, value));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(InvalidParameter::out_of_range(
                Parameter::Proportion,
                value,
                "0 <= p <= 1",
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Variance term `p * (1 - p)`
    pub fn variance(self) -> f64 {
        self.0 * (1.0 - self.0)
    }
}

impl Default for Proportion {
    fn default() -> Self {
        Self::MOST_CONSERVATIVE
    }
}

impl TryFrom<f64> for Proportion {
    type Error = InvalidParameter;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Proportion> for f64 {
    fn from(proportion: Proportion) -> Self {
        proportion.0
    }
}

/// Size of a finite, known population (at least 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct PopulationSize(u64);

impl PopulationSize {
    /// Accepts a signed value so zero and negative sizes surface as errors
    pub fn new(value: i64) -> Result<Self, InvalidParameter> {
        if value < 1 {
            return Err(InvalidParameter::new(
                Parameter::PopulationSize,
                InvalidReason::NonPositive { value },
            ));
        }
        Ok(Self(value as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for PopulationSize {
    type Error = InvalidParameter;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PopulationSize> for u64 {
    fn from(size: PopulationSize) -> Self {
        size.0
    }
}

/// The four validated inputs of a single sample size calculation.
///
/// `population_size: None` means an infinite or unknown population; `Some`
/// switches on the finite population correction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimateInputs {
    pub confidence_level: ConfidenceLevel,
    pub margin_of_error: MarginOfError,
    pub proportion: Proportion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_size: Option<PopulationSize>,
}

impl EstimateInputs {
    /// Validate raw inputs in parameter order, failing on the first bad one
    pub fn new(
        confidence_level: ConfidenceLevel,
        margin_of_error: f64,
        proportion: f64,
        population_size: Option<i64>,
    ) -> Result<Self, InvalidParameter> {
        Ok(Self {
            confidence_level,
            margin_of_error: MarginOfError::new(margin_of_error)?,
            proportion: Proportion::new(proportion)?,
            population_size: population_size.map(PopulationSize::new).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_bounds() {
        assert!(MarginOfError::new(0.05).is_ok());
        assert!(MarginOfError::new(1e-6).is_ok());
        assert!(MarginOfError::new(0.999).is_ok());

        for bad in [0.0, -0.01, 1.0, 1.5] {
            let err = MarginOfError::new(bad).unwrap_err();
            assert_eq!(err.parameter, Parameter::MarginOfError);
            assert!(matches!(err.reason, InvalidReason::OutOfRange { .. }));
        }

        for bad in [f64::NAN, f64::INFINITY] {
            let err = MarginOfError::new(bad).unwrap_err();
            assert!(matches!(err.reason, InvalidReason::NotFinite { .. }));
        }
    }

    #[test]
    fn test_margin_from_percent() {
        let margin = MarginOfError::from_percent(5.0).unwrap();
        assert!((margin.value() - 0.05).abs() < 1e-12);
        assert!((margin.percent() - 5.0).abs() < 1e-12);
        assert!(MarginOfError::from_percent(100.0).is_err());
    }

    #[test]
    fn test_proportion_bounds() {
        assert!(Proportion::new(0.0).is_ok());
        assert!(Proportion::new(1.0).is_ok());
        assert!(Proportion::new(-0.01).is_err());
        assert!(Proportion::new(1.01).is_err());
        assert!(Proportion::new(f64::NAN).is_err());
        assert_eq!(Proportion::default().value(), 0.5);
        assert_eq!(Proportion::default().variance(), 0.25);
    }

    #[test]
    fn test_population_must_be_positive() {
        assert_eq!(PopulationSize::new(1).unwrap().get(), 1);
        for bad in [0, -1, -10_000] {
            let err = PopulationSize::new(bad).unwrap_err();
            assert_eq!(err.parameter, Parameter::PopulationSize);
            assert_eq!(err.reason, InvalidReason::NonPositive { value: bad });
        }
    }

    #[test]
    fn test_inputs_report_first_invalid_parameter() {
        let err = EstimateInputs::new(ConfidenceLevel::NinetyFive, 0.0, 2.0, Some(0)).unwrap_err();
        assert_eq!(err.parameter, Parameter::MarginOfError);

        let err =
            EstimateInputs::new(ConfidenceLevel::NinetyFive, 0.05, 2.0, Some(0)).unwrap_err();
        assert_eq!(err.parameter, Parameter::Proportion);

        let err =
            EstimateInputs::new(ConfidenceLevel::NinetyFive, 0.05, 0.5, Some(0)).unwrap_err();
        assert_eq!(err.parameter, Parameter::PopulationSize);
    }

    #[test]
    fn test_inputs_deserialize_validates() {
        let inputs: EstimateInputs = serde_json::from_str(
            r#"{"confidence_level": 99, "margin_of_error": 0.03, "proportion": 0.4}"#,
        )
        .unwrap();
        assert_eq!(inputs.confidence_level, ConfidenceLevel::NinetyNine);
        assert_eq!(inputs.population_size, None);

        let bad = serde_json::from_str::<EstimateInputs>(
            r#"{"confidence_level": 95, "margin_of_error": 0.05, "proportion": 0.5, "population_size": -5}"#,
        );
        assert!(bad.is_err());
    }
}
