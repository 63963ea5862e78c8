//! Error types for policy configuration.

use thiserror::Error;

/// Errors raised while loading the policy denylist.
///
/// These are load-time failures only; validation of a prompt never fails.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The denylist contains an empty or whitespace-only keyword.
    #[error("Denylist keyword at index {index} is empty")]
    EmptyKeyword {
        /// Position of the offending entry in the configured list.
        index: usize,
    },
}
