//! Error types for the decision pipeline.
//!
//! Only configuration errors and invalid input surface to the caller.
//! Per-call layer failures are absorbed inside the layers themselves and
//! arrive here as degraded zero-score results, never as errors.

use thiserror::Error;

/// Pipeline error type.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The prompt was empty or whitespace-only. Rejected before any layer
    /// runs; a client error, not a pipeline failure.
    #[error("Prompt must be a non-empty string")]
    EmptyPrompt,

    /// Decision thresholds do not form a valid partition of 0-100.
    #[error("Invalid decision thresholds: {0}")]
    InvalidThresholds(String),

    /// Detection or scoring configuration failed to load.
    #[error("Detection configuration error: {0}")]
    Detect(#[from] guard_detect::DetectError),

    /// Policy configuration failed to load.
    #[error("Policy configuration error: {0}")]
    Policy(#[from] guard_policy::PolicyError),
}
