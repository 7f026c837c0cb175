//! Sensitivity analysis built on the core estimator.
//!
//! Two operations reuse [`estimate`](crate::estimator::estimate):
//!
//! - [`sweep`] varies one input (margin, confidence level or proportion) while
//!   holding the others fixed, producing a [`SweepSeries`] for charting.
//! - [`reference_table`] computes a [`ReferenceTable`] over the cross product
//!   of confidence levels and margins.
//!
//! ```
//! use samplesize_core::sensitivity::{FixedInputs, SweepDimension, SweepRange, sweep};
//!
//! let series = sweep(
//!     SweepDimension::MarginOfError,
//!     &FixedInputs::default(),
//!     &SweepRange::Values(vec![0.03, 0.05]),
//! )
//! .unwrap();
//! assert_eq!(series.sample_sizes(), vec![1068, 385]);
//! ```
//!
//! Inputs are validated sequentially up front, so the reported error is always
//! the first invalid one. The estimates themselves are independent and run on
//! the rayon pool when the `parallel` feature is enabled.

mod config;
mod sweep;
mod table;

pub use config::{FixedInputs, MAX_SWEEP_STEPS, SweepDimension, SweepRange};
pub use sweep::{SweepPoint, SweepSeries, sweep};
pub use table::{
    QUICK_REFERENCE_LEVELS, QUICK_REFERENCE_MARGINS, ReferenceTable, STANDARD_MARGINS,
    reference_table,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::estimator::estimate;
use crate::model::{EstimateInputs, SampleSizeResult};

/// Estimate every input, preserving order
#[cfg(feature = "parallel")]
fn estimate_all(inputs: &[EstimateInputs]) -> Vec<SampleSizeResult> {
    inputs.par_iter().map(estimate).collect()
}

#[cfg(not(feature = "parallel"))]
fn estimate_all(inputs: &[EstimateInputs]) -> Vec<SampleSizeResult> {
    inputs.iter().map(estimate).collect()
}
