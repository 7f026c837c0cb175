//! Command-line front end for the sample size engine
//!
//! Turns command-line arguments or a YAML request file into a [`Report`] and
//! renders it as text, JSON or YAML.

pub mod cli;
pub mod format;
pub mod logging;
pub mod report;
pub mod request;

pub use logging::init_logging;
pub use report::{OutputFormat, Report};
pub use request::{CalculationRequest, SweepRequest, TableRequest};
