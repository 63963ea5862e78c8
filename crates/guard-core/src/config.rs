//! Configuration types for the PromptGuard pipeline.
//!
//! Everything tunable lives here or in a layer crate's config section:
//! pattern rules, category weights, risk bands, the denylist, the intent
//! oracle settings and the decision thresholds. All of it is loaded and
//! validated once; the engine never re-reads configuration per call.

use serde::{Deserialize, Serialize};

use guard_detect::{DetectorConfig, ScorerConfig};
use guard_intent::IntentConfig;
use guard_policy::PolicyConfig;

use crate::decision::Action;
use crate::error::GuardError;

/// Configuration for the full decision pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Pattern detector rules.
    pub detector: DetectorConfig,

    /// Category weights and risk-level bands.
    pub scorer: ScorerConfig,

    /// Policy denylist.
    pub policy: PolicyConfig,

    /// Remote intent oracle settings.
    pub intent: IntentConfig,

    /// Score thresholds driving the final action.
    pub thresholds: DecisionThresholds,
}

impl GuardConfig {
    /// Default configuration with the intent API key pulled from the
    /// environment.
    pub fn from_env() -> Self {
        Self {
            intent: IntentConfig::from_env(),
            ..Self::default()
        }
    }
}

/// Inclusive lower bounds of the SANITIZE, REWRITE and BLOCK bands on the
/// 0-100 score scale. Scores below `sanitize_floor` are allowed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// First score that triggers sanitization.
    pub sanitize_floor: u8,
    /// First score that triggers a rewrite.
    pub rewrite_floor: u8,
    /// First score that blocks the prompt outright.
    pub block_floor: u8,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            sanitize_floor: 10,
            rewrite_floor: 40,
            block_floor: 70,
        }
    }
}

impl DecisionThresholds {
    /// Validates that the floors partition 0-100 without gaps or overlaps.
    pub fn validate(&self) -> Result<(), GuardError> {
        if self.sanitize_floor == 0 {
            return Err(GuardError::InvalidThresholds(
                "sanitize floor must be positive, or every prompt would be sanitized".to_string(),
            ));
        }
        if self.sanitize_floor > self.rewrite_floor || self.rewrite_floor > self.block_floor {
            return Err(GuardError::InvalidThresholds(format!(
                "floors must be ordered: sanitize {} <= rewrite {} <= block {}",
                self.sanitize_floor, self.rewrite_floor, self.block_floor
            )));
        }
        Ok(())
    }

    /// Maps a 0-100 score to its action. Total: every score maps to
    /// exactly one action.
    pub fn action_for(&self, score: u8) -> Action {
        if score >= self.block_floor {
            Action::Block
        } else if score >= self.rewrite_floor {
            Action::Rewrite
        } else if score >= self.sanitize_floor {
            Action::Sanitize
        } else {
            Action::Allow
        }
    }
}
