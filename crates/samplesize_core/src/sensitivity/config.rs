//! Configuration types for sensitivity sweeps

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidParameter, InvalidReason, Parameter};
use crate::model::ConfidenceLevel;

/// Largest number of points a linear range may generate
pub const MAX_SWEEP_STEPS: usize = 10_000;

/// Number of points in the default margin sweep (0.5% to 10% in 0.5% steps)
const DEFAULT_MARGIN_STEPS: usize = 20;
/// Number of points in the default proportion sweep (0.05 to 0.95 in 0.05 steps)
const DEFAULT_PROPORTION_STEPS: usize = 19;

/// The input a sweep varies while the others stay fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepDimension {
    /// Values are fractions, e.g. `0.05`
    MarginOfError,
    /// Values are percents: `90`, `95`, `99`, `99.9`
    ConfidenceLevel,
    /// Values are fractions in [0, 1]
    Proportion,
}

impl SweepDimension {
    pub const ALL: [SweepDimension; 3] = [
        SweepDimension::MarginOfError,
        SweepDimension::ConfidenceLevel,
        SweepDimension::Proportion,
    ];

    /// The estimator parameter this dimension drives
    pub fn parameter(self) -> Parameter {
        match self {
            SweepDimension::MarginOfError => Parameter::MarginOfError,
            SweepDimension::ConfidenceLevel => Parameter::ConfidenceLevel,
            SweepDimension::Proportion => Parameter::Proportion,
        }
    }

    /// Default set of values swept when the caller supplies none
    pub fn default_values(self) -> Vec<f64> {
        match self {
            SweepDimension::MarginOfError => (1..=DEFAULT_MARGIN_STEPS)
                .map(|i| i as f64 / 200.0)
                .collect(),
            SweepDimension::ConfidenceLevel => ConfidenceLevel::ALL
                .iter()
                .map(|level| level.percent())
                .collect(),
            SweepDimension::Proportion => (1..=DEFAULT_PROPORTION_STEPS)
                .map(|i| (i * 5) as f64 / 100.0)
                .collect(),
        }
    }
}

impl fmt::Display for SweepDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SweepDimension::MarginOfError => "Margin of Error",
            SweepDimension::ConfidenceLevel => "Confidence Level",
            SweepDimension::Proportion => "Population Proportion",
        };
        f.write_str(label)
    }
}

/// Inputs held constant during a sweep.
///
/// Values are raw so that a bad fixed input surfaces as an `InvalidParameter`
/// from the sweep itself. The field matching the swept dimension is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedInputs {
    pub confidence_level: ConfidenceLevel,
    pub margin_of_error: f64,
    pub proportion: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population_size: Option<i64>,
}

impl Default for FixedInputs {
    fn default() -> Self {
        Self {
            confidence_level: ConfidenceLevel::NinetyFive,
            margin_of_error: 0.05,
            proportion: 0.5,
            population_size: None,
        }
    }
}

/// Which values a sweep visits
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepRange {
    /// The dimension's default set, see [`SweepDimension::default_values`]
    #[default]
    Default,
    /// Explicit values, in any order
    Values(Vec<f64>),
    /// `steps` evenly spaced values from `min` to `max` inclusive
    Linear { min: f64, max: f64, steps: usize },
}

impl SweepRange {
    /// Materialize the values for a dimension (unsorted, not yet checked
    /// against the dimension's bounds).
    ///
    /// A linear range with more than [`MAX_SWEEP_STEPS`] steps is rejected
    /// before anything is allocated.
    pub fn values(&self, dimension: SweepDimension) -> Result<Vec<f64>, InvalidParameter> {
        match self {
            SweepRange::Default => Ok(dimension.default_values()),
            SweepRange::Values(values) => Ok(values.clone()),
            SweepRange::Linear { steps, .. } if *steps > MAX_SWEEP_STEPS => {
                Err(InvalidParameter::new(
                    Parameter::SweepValues,
                    InvalidReason::OutOfRange {
                        value: *steps as f64,
                        expected: "at most 10000 steps",
                    },
                ))
            }
            SweepRange::Linear { min, max, steps } => Ok(linear_values(*min, *max, *steps)),
        }
    }
}

fn linear_values(min: f64, max: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step_size = (max - min) / (steps - 1) as f64;
            (0..steps).map(|i| min + step_size * i as f64).collect()
        }
    }
}
