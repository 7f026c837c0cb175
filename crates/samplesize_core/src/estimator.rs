//! Core sample size estimator
//!
//! Closed-form sample size for estimating a population proportion:
//!
//! ```text
//! n0    = z^2 * p * (1 - p) / e^2
//! n_adj = n0 / (1 + (n0 - 1) / N)      (only when a population N is known)
//! n     = max(1, ceil(n_adj))
//! ```

use crate::error::InvalidParameter;
use crate::model::{ConfidenceLevel, EstimateInputs, SampleSizeResult};

/// Distance from an integer, in units of relative machine epsilon, below which
/// a continuous size is treated as exactly that integer before rounding up.
/// Floating point products such as `1.96^2 * 0.25 / 0.01^2` land an ulp or two
/// away from 9604; anything further is a real fractional requirement.
const INTEGER_SNAP_ULPS: f64 = 4.0;

/// Compute the required sample size from raw inputs.
///
/// All parameters are validated before any arithmetic runs; the first invalid
/// one is reported.
///
/// # Example
///
/// ```
/// use samplesize_core::{ConfidenceLevel, compute};
///
/// let result = compute(ConfidenceLevel::NinetyFive, 0.05, 0.5, None).unwrap();
/// assert_eq!(result.sample_size, 385);
/// ```
pub fn compute(
    confidence_level: ConfidenceLevel,
    margin_of_error: f64,
    proportion: f64,
    population_size: Option<i64>,
) -> Result<SampleSizeResult, InvalidParameter> {
    let inputs = EstimateInputs::new(
        confidence_level,
        margin_of_error,
        proportion,
        population_size,
    )?;
    Ok(estimate(&inputs))
}

/// Compute the required sample size for inputs that are already validated
pub fn estimate(inputs: &EstimateInputs) -> SampleSizeResult {
    let z = critical_value(inputs.confidence_level);
    let unadjusted = unadjusted_sample_size(
        z,
        inputs.proportion.value(),
        inputs.margin_of_error.value(),
    );

    let corrected = inputs
        .population_size
        .map(|population| finite_population_correction(unadjusted, population.get()));

    SampleSizeResult {
        sample_size: round_up_sample_size(corrected.unwrap_or(unadjusted)),
        critical_value: z,
        unadjusted_size: unadjusted,
        corrected_size: corrected,
        inputs: *inputs,
    }
}

/// Critical value (z-score) for a confidence level
pub fn critical_value(level: ConfidenceLevel) -> f64 {
    level.z_score()
}

/// Continuous sample size for an infinite population: `z^2 * p * (1 - p) / e^2`
pub fn unadjusted_sample_size(z: f64, proportion: f64, margin_of_error: f64) -> f64 {
    z.powi(2) * proportion * (1.0 - proportion) / margin_of_error.powi(2)
}

/// Finite population correction: `n0 / (1 + (n0 - 1) / N)`.
///
/// Never returns more than `n0`. For `n0 <= 1` the correction would raise the
/// value (or divide zero by zero when `N == 1`), so `n0` is returned as is.
pub fn finite_population_correction(unadjusted: f64, population_size: u64) -> f64 {
    if unadjusted <= 1.0 {
        return unadjusted;
    }
    let population = population_size as f64;
    let corrected = unadjusted / (1.0 + (unadjusted - 1.0) / population);
    corrected.min(unadjusted)
}

/// Round a continuous size up to a whole number of respondents, at least 1
fn round_up_sample_size(size: f64) -> u64 {
    let nearest = size.round();
    let tolerance = INTEGER_SNAP_ULPS * f64::EPSILON * nearest.max(1.0);
    let snapped = if (size - nearest).abs() <= tolerance {
        nearest
    } else {
        size.ceil()
    };
    (snapped as u64).max(1)
}
