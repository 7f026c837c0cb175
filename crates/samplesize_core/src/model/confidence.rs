//! Enumerated confidence levels and their critical values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidParameter, InvalidReason, Parameter};

/// Tolerance used when matching a percent against the enumerated levels
const PERCENT_MATCH_TOLERANCE: f64 = 1e-9;

/// One of the four supported confidence levels.
///
/// Each level maps to a fixed two-sided critical value of the standard normal
/// distribution. There is no interpolation between levels. Serialized as its
/// percent value (`95`, `99.9`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub enum ConfidenceLevel {
    Ninety,
    #[default]
    NinetyFive,
    NinetyNine,
    NinetyNinePointNine,
}

impl ConfidenceLevel {
    /// All levels in ascending order
    pub const ALL: [ConfidenceLevel; 4] = [
        ConfidenceLevel::Ninety,
        ConfidenceLevel::NinetyFive,
        ConfidenceLevel::NinetyNine,
        ConfidenceLevel::NinetyNinePointNine,
    ];

    /// Critical value (z-score) for this level
    pub const fn z_score(self) -> f64 {
        match self {
            ConfidenceLevel::Ninety => 1.645,
            ConfidenceLevel::NinetyFive => 1.96,
            ConfidenceLevel::NinetyNine => 2.576,
            ConfidenceLevel::NinetyNinePointNine => 3.291,
        }
    }

    /// Level as a percent, e.g. `95.0`
    pub const fn percent(self) -> f64 {
        match self {
            ConfidenceLevel::Ninety => 90.0,
            ConfidenceLevel::NinetyFive => 95.0,
            ConfidenceLevel::NinetyNine => 99.0,
            ConfidenceLevel::NinetyNinePointNine => 99.9,
        }
    }

    /// Look up a level by its percent value.
    ///
    /// Only the four enumerated percents are accepted; anything else (including
    /// values between levels) is an `InvalidParameter`.
    pub fn from_percent(percent: f64) -> Result<Self, InvalidParameter> {
        if !percent.is_finite() {
            return Err(InvalidParameter::not_finite(
                Parameter::ConfidenceLevel,
                percent,
            ));
        }
        Self::ALL
            .into_iter()
            .find(|level| (level.percent() - percent).abs() < PERCENT_MATCH_TOLERANCE)
            .ok_or_else(|| {
                InvalidParameter::new(
                    Parameter::ConfidenceLevel,
                    InvalidReason::NotEnumerated { value: percent },
                )
            })
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = InvalidParameter;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        Self::from_percent(percent)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.percent()
    }
}

impl FromStr for ConfidenceLevel {
    type Err = InvalidParameter;

    /// Accepts `"95"`, `"95%"`, `" 99.9 % "`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
        let percent: f64 = number.parse().map_err(|_| {
            InvalidParameter::new(
                Parameter::ConfidenceLevel,
                InvalidReason::Unparseable {
                    input: s.to_string(),
                },
            )
        })?;
        Self::from_percent(percent)
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
