//! Result types produced by the estimator

use serde::{Deserialize, Serialize};

use super::EstimateInputs;

/// Required sample size together with everything that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeResult {
    /// Required number of respondents, always >= 1
    pub sample_size: u64,
    /// Critical value used for the confidence level
    pub critical_value: f64,
    /// Continuous size before the finite population correction (`n0`)
    pub unadjusted_size: f64,
    /// Continuous size after the correction, when a population was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected_size: Option<f64>,
    pub inputs: EstimateInputs,
}

impl SampleSizeResult {
    pub fn is_corrected(&self) -> bool {
        self.corrected_size.is_some()
    }

    /// The continuous value that was rounded up into `sample_size`
    pub fn continuous_size(&self) -> f64 {
        self.corrected_size.unwrap_or(self.unadjusted_size)
    }
}
