//! The intent-oracle capability seam.
//!
//! The pipeline only requires one capability from the external language
//! model: score a prompt for hidden malicious intent. Keeping the seam this
//! narrow lets tests swap the remote client for a deterministic stub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// A structured intent verdict from the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentAssessment {
    /// Risk score in [0.0, 1.0].
    pub score: f64,
    /// Brief justification for the score.
    pub reason: String,
}

impl IntentAssessment {
    /// Creates an assessment, clamping the score into [0.0, 1.0].
    ///
    /// Non-finite scores collapse to 0.0; external responses are not
    /// trusted to stay in range.
    pub fn new(score: f64, reason: impl Into<String>) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            score,
            reason: reason.into(),
        }
    }
}

/// Scores a prompt for hidden malicious intent.
///
/// Implementors may perform network I/O and may fail; the caller is
/// responsible for containing failures.
#[async_trait]
pub trait IntentOracle: Send + Sync {
    /// Returns the oracle's intent verdict for a prompt.
    async fn score_intent(&self, prompt: &str) -> Result<IntentAssessment, IntentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_clamps_out_of_range_scores() {
        assert_eq!(IntentAssessment::new(1.7, "x").score, 1.0);
        assert_eq!(IntentAssessment::new(-0.3, "x").score, 0.0);
        assert_eq!(IntentAssessment::new(0.42, "x").score, 0.42);
    }

    #[test]
    fn test_assessment_rejects_non_finite_scores() {
        assert_eq!(IntentAssessment::new(f64::NAN, "x").score, 0.0);
        assert_eq!(IntentAssessment::new(f64::INFINITY, "x").score, 0.0);
    }
}
