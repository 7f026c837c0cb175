//! Sample size calculation library
//!
//! This crate computes the minimum sample size needed to estimate a population
//! proportion within a margin of error at a given confidence level. It supports:
//! - The four standard confidence levels (90%, 95%, 99%, 99.9%)
//! - Finite population correction for known, bounded populations
//! - Sensitivity sweeps over margin, confidence level and proportion
//! - Reference tables over confidence level and margin combinations
//!
//! Every operation is a pure function over its inputs. Invalid inputs are
//! rejected up front with [`InvalidParameter`].
//!
//! # Builder DSL
//!
//! ```
//! use samplesize_core::config::EstimateBuilder;
//!
//! let result = EstimateBuilder::new()
//!     .margin_percent(3.0)
//!     .proportion(0.5)
//!     .compute()
//!     .unwrap();
//! assert_eq!(result.sample_size, 1068);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod estimator;
pub mod sensitivity;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::EstimateBuilder;
pub use error::{InvalidParameter, InvalidReason, Parameter};
pub use estimator::{compute, estimate};
pub use model::{
    ConfidenceLevel, EstimateInputs, MarginOfError, PopulationSize, Proportion, SampleSizeResult,
};
pub use sensitivity::{
    FixedInputs, ReferenceTable, SweepDimension, SweepPoint, SweepRange, SweepSeries,
    reference_table, sweep,
};
