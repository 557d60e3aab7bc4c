//! Error types
//!
//! Only construction-time problems are errors. Degenerate strokes score 0 and
//! invalid simulation operations are silently ignored.

use std::fmt;

/// A ruleset that cannot produce a playable simulation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A speed, size, interval or dimension that must be strictly positive
    NonPositive {
        /// Name of the offending field
        name: &'static str,
        value: f32,
    },
    /// A `[min, max]` range with `min > max`
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    /// A per-frame spawn chance outside `(0, 1]`
    ProbabilityOutOfRange { value: f32 },
    /// A drift or jitter amount below zero
    Negative { name: &'static str, value: f32 },
    /// Infinite or NaN
    NonFinite { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { name, value } => {
                write!(f, "{name} must be positive (got {value})")
            }
            Self::InvertedRange { name, min, max } => {
                write!(f, "{name} range is inverted: min {min} > max {max}")
            }
            Self::ProbabilityOutOfRange { value } => {
                write!(f, "spawn chance must be in (0, 1] (got {value})")
            }
            Self::Negative { name, value } => {
                write!(f, "{name} must not be negative (got {value})")
            }
            Self::NonFinite { name, value } => {
                write!(f, "{name} must be finite (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure talking to the score store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Stored data could not be encoded or decoded
    Serialization(String),
    /// Backing storage is not reachable
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialization(msg) => write!(f, "score data could not be serialized: {msg}"),
            Self::Unavailable(msg) => write!(f, "score store unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
