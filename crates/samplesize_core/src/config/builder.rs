//! Estimate Builder
//!
//! Fluent construction of [`EstimateInputs`], starting from the conventional
//! defaults (95% confidence, 5% margin, p = 0.5, infinite population).
//!
//! # Example
//!
//! ```
//! use samplesize_core::config::EstimateBuilder;
//! use samplesize_core::model::ConfidenceLevel;
//!
//! let result = EstimateBuilder::new()
//!     .confidence(ConfidenceLevel::NinetyNine)
//!     .margin_percent(3.0)
//!     .population(50_000)
//!     .compute()
//!     .unwrap();
//! assert_eq!(result.sample_size, 1778);
//! ```

use crate::error::InvalidParameter;
use crate::estimator::estimate;
use crate::model::{ConfidenceLevel, EstimateInputs, SampleSizeResult};
use crate::sensitivity::FixedInputs;

/// Builder for a single calculation. Values are only validated in [`build`].
///
/// [`build`]: EstimateBuilder::build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateBuilder {
    confidence_level: ConfidenceLevel,
    margin_of_error: f64,
    proportion: f64,
    population_size: Option<i64>,
}

impl Default for EstimateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            confidence_level: ConfidenceLevel::NinetyFive,
            margin_of_error: 0.05,
            proportion: 0.5,
            population_size: None,
        }
    }

    #[must_use]
    pub fn confidence(mut self, level: ConfidenceLevel) -> Self {
        self.confidence_level = level;
        self
    }

    /// Margin of error as a fraction, e.g. `0.05`
    #[must_use]
    pub fn margin(mut self, margin_of_error: f64) -> Self {
        self.margin_of_error = margin_of_error;
        self
    }

    /// Margin of error as a percent, e.g. `5.0`
    #[must_use]
    pub fn margin_percent(mut self, percent: f64) -> Self {
        self.margin_of_error = percent / 100.0;
        self
    }

    #[must_use]
    pub fn proportion(mut self, proportion: f64) -> Self {
        self.proportion = proportion;
        self
    }

    /// Known population size; enables the finite population correction
    #[must_use]
    pub fn population(mut self, size: i64) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Treat the population as infinite again
    #[must_use]
    pub fn infinite_population(mut self) -> Self {
        self.population_size = None;
        self
    }

    pub fn build(self) -> Result<EstimateInputs, InvalidParameter> {
        EstimateInputs::new(
            self.confidence_level,
            self.margin_of_error,
            self.proportion,
            self.population_size,
        )
    }

    pub fn compute(self) -> Result<SampleSizeResult, InvalidParameter> {
        self.build().map(|inputs| estimate(&inputs))
    }

    /// The builder's values as the fixed inputs of a sweep
    pub fn fixed_inputs(self) -> FixedInputs {
        FixedInputs {
            confidence_level: self.confidence_level,
            margin_of_error: self.margin_of_error,
            proportion: self.proportion,
            population_size: self.population_size,
        }
    }
}
