//! Error types for the intent layer.
//!
//! These errors never cross the pipeline boundary: the
//! [`SemanticIntentAgent`](crate::SemanticIntentAgent) absorbs them into a
//! zero-score assessment with a diagnostic reason.

use thiserror::Error;

/// Errors from the remote intent-scoring call.
#[derive(Debug, Error)]
pub enum IntentError {
    /// Transport-level failure (connection, TLS, non-2xx status).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not contain the expected structured content.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The completion response carried no choices.
    #[error("response contained no choices")]
    EmptyResponse,
}
