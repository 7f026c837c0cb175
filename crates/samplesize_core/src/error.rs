use std::fmt;

use serde::{Deserialize, Serialize};

/// The input a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    ConfidenceLevel,
    MarginOfError,
    Proportion,
    PopulationSize,
    /// The set of values a sensitivity sweep varies over
    SweepValues,
    /// Confidence levels requested for a reference table
    TableLevels,
    /// Margins requested for a reference table
    TableMargins,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::ConfidenceLevel => "confidence level",
            Parameter::MarginOfError => "margin of error",
            Parameter::Proportion => "proportion",
            Parameter::PopulationSize => "population size",
            Parameter::SweepValues => "sweep values",
            Parameter::TableLevels => "reference table confidence levels",
            Parameter::TableMargins => "reference table margins",
        };
        f.write_str(name)
    }
}

/// Why a parameter was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InvalidReason {
    /// Value lies outside its admissible interval
    OutOfRange { value: f64, expected: &'static str },
    /// NaN or infinite
    NotFinite { value: f64 },
    /// Not one of the enumerated confidence levels
    NotEnumerated { value: f64 },
    /// Population sizes must be at least 1
    NonPositive { value: i64 },
    /// Text that could not be read as a number
    Unparseable { input: String },
    /// An empty set of values where at least one is required
    Empty,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::OutOfRange { value, expected } => {
                write!(f, "{value} is out of range (expected {expected})")
            }
            InvalidReason::NotFinite { value } => write!(f, "{value} is not a finite number"),
            InvalidReason::NotEnumerated { value } => {
                write!(f, "{value} is not one of 90, 95, 99, 99.9")
            }
            InvalidReason::NonPositive { value } => {
                write!(f, "{value} is not a positive integer")
            }
            InvalidReason::Unparseable { input } => write!(f, "cannot parse {input:?}"),
            InvalidReason::Empty => write!(f, "at least one value is required"),
        }
    }
}

/// The single failure kind of the engine: a caller supplied an unusable input.
///
/// Validation runs before any arithmetic, so no partial result is ever
/// produced alongside this error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidParameter {
    pub parameter: Parameter,
    pub reason: InvalidReason,
}

impl InvalidParameter {
    pub fn new(parameter: Parameter, reason: InvalidReason) -> Self {
        Self { parameter, reason }
    }

    pub(crate) fn out_of_range(parameter: Parameter, value: f64, expected: &'static str) -> Self {
        Self::new(parameter, InvalidReason::OutOfRange { value, expected })
    }

    pub(crate) fn not_finite(parameter: Parameter, value: f64) -> Self {
        Self::new(parameter, InvalidReason::NotFinite { value })
    }

    pub(crate) fn empty(parameter: Parameter) -> Self {
        Self::new(parameter, InvalidReason::Empty)
    }
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.parameter, self.reason)
    }
}

impl std::error::Error for InvalidParameter {}

pub type Result<T> = std::result::Result<T, InvalidParameter>;
