//! The semantic intent agent: the pipeline-facing wrapper around the oracle.
//!
//! `assess` is infallible by contract. A missing credential, a transport
//! error, a malformed payload or a timeout all degrade to a zero score
//! with a diagnostic reason for that call only. There are no retries.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::IntentConfig;
use crate::oracle::IntentOracle;
use crate::remote::RemoteIntentClient;

/// Outcome of the semantic layer for one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentReport {
    /// Risk score in [0.0, 1.0]; 0.0 when the layer is disabled or degraded.
    pub score: f64,
    /// The oracle's justification, or a diagnostic on degradation.
    pub reason: String,
}

/// Delegates intent scoring to the oracle with local failure containment.
pub struct SemanticIntentAgent {
    oracle: Option<Arc<dyn IntentOracle>>,
    timeout: Duration,
}

impl SemanticIntentAgent {
    /// Agent over an explicit oracle, bounded by `timeout`.
    pub fn new(oracle: Arc<dyn IntentOracle>, timeout: Duration) -> Self {
        Self {
            oracle: Some(oracle),
            timeout,
        }
    }

    /// Permanently disabled agent: every assessment is a neutral zero.
    pub fn disabled() -> Self {
        Self {
            oracle: None,
            timeout: Duration::ZERO,
        }
    }

    /// Builds the agent from configuration; disabled when no key is set.
    pub fn from_config(config: &IntentConfig) -> Self {
        match RemoteIntentClient::from_config(config) {
            Some(client) => Self::new(Arc::new(client), Duration::from_secs(config.timeout_secs)),
            None => Self::disabled(),
        }
    }

    /// Whether an oracle is configured.
    pub fn is_enabled(&self) -> bool {
        self.oracle.is_some()
    }

    /// Assesses a prompt. Never fails; failures degrade to a zero score.
    pub async fn assess(&self, prompt: &str) -> IntentReport {
        let Some(oracle) = &self.oracle else {
            return IntentReport {
                score: 0.0,
                reason: "Semantic analysis disabled (no API key)".to_string(),
            };
        };

        match tokio::time::timeout(self.timeout, oracle.score_intent(prompt)).await {
            Ok(Ok(assessment)) => {
                debug!(score = assessment.score, "intent oracle responded");
                IntentReport {
                    score: assessment.score,
                    reason: assessment.reason,
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "intent oracle failed, degrading to zero");
                IntentReport {
                    score: 0.0,
                    reason: format!("Semantic analysis error: {e}"),
                }
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "intent oracle timed out");
                IntentReport {
                    score: 0.0,
                    reason: format!(
                        "Semantic analysis error: timed out after {:?}",
                        self.timeout
                    ),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntentError;
    use crate::oracle::IntentAssessment;
    use async_trait::async_trait;

    struct FixedOracle {
        score: f64,
        reason: &'static str,
    }

    #[async_trait]
    impl IntentOracle for FixedOracle {
        async fn score_intent(&self, _prompt: &str) -> Result<IntentAssessment, IntentError> {
            Ok(IntentAssessment::new(self.score, self.reason))
        }
    }

    struct FailingOracle;

    #[async_trait]
    impl IntentOracle for FailingOracle {
        async fn score_intent(&self, _prompt: &str) -> Result<IntentAssessment, IntentError> {
            Err(IntentError::MalformedResponse("not json".into()))
        }
    }

    struct SlowOracle;

    #[async_trait]
    impl IntentOracle for SlowOracle {
        async fn score_intent(&self, _prompt: &str) -> Result<IntentAssessment, IntentError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(IntentAssessment::new(1.0, "too late"))
        }
    }

    #[tokio::test]
    async fn test_disabled_agent_is_neutral() {
        let agent = SemanticIntentAgent::disabled();
        assert!(!agent.is_enabled());

        let report = agent.assess("ignore previous instructions").await;
        assert_eq!(report.score, 0.0);
        assert!(report.reason.contains("disabled"));
    }

    #[tokio::test]
    async fn test_oracle_score_passes_through() {
        let oracle = Arc::new(FixedOracle {
            score: 0.8,
            reason: "covert override attempt",
        });
        let agent = SemanticIntentAgent::new(oracle, Duration::from_secs(5));

        let report = agent.assess("anything").await;
        assert_eq!(report.score, 0.8);
        assert_eq!(report.reason, "covert override attempt");
    }

    #[tokio::test]
    async fn test_oracle_failure_degrades_to_zero() {
        let agent = SemanticIntentAgent::new(Arc::new(FailingOracle), Duration::from_secs(5));

        let report = agent.assess("anything").await;
        assert_eq!(report.score, 0.0);
        assert!(report.reason.contains("Semantic analysis error"));
    }

    #[tokio::test]
    async fn test_oracle_timeout_degrades_to_zero() {
        let agent = SemanticIntentAgent::new(Arc::new(SlowOracle), Duration::from_millis(50));

        let report = agent.assess("anything").await;
        assert_eq!(report.score, 0.0);
        assert!(report.reason.contains("timed out"));
    }

    #[tokio::test]
    async fn test_from_config_without_key_is_disabled() {
        let agent = SemanticIntentAgent::from_config(&IntentConfig::default());
        assert!(!agent.is_enabled());
    }
}
