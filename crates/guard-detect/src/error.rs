//! Error types for detection and scoring configuration.
//!
//! All variants are load-time failures. Once a [`crate::PatternTable`] or
//! [`crate::RiskScorer`] has been built, per-call operations cannot fail.

use thiserror::Error;

/// Errors raised while loading detection or scoring configuration.
#[derive(Debug, Error)]
pub enum DetectError {
    /// A configured pattern failed to compile as a regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// The underlying regex compile error.
        #[source]
        source: regex::Error,
    },

    /// A rule or category weight is negative or not finite.
    #[error("Invalid weight {weight} for '{key}': weights must be finite and non-negative")]
    InvalidWeight {
        /// Category id or pattern the weight was attached to.
        key: String,
        /// The rejected value.
        weight: f64,
    },

    /// Risk-level band floors are not monotonic.
    #[error("Invalid risk bands: medium floor {medium_floor} must not exceed high floor {high_floor}")]
    InvalidBands {
        /// Configured floor of the Medium band.
        medium_floor: u8,
        /// Configured floor of the High band.
        high_floor: u8,
    },
}
