//! Keyword denylist validation.
//!
//! An independent check against a fixed list of forbidden terms. The score
//! is binary: any hit counts as a full policy breach, regardless of how
//! many keywords matched. Severity grading happens in other layers.

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Policy configuration: the forbidden keyword denylist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Keywords checked by case-insensitive containment.
    pub denylist: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            denylist: default_denylist(),
        }
    }
}

/// The built-in denylist of sensitive and forbidden terms.
pub fn default_denylist() -> Vec<String> {
    [
        "password",
        "config",
        "admin",
        "root",
        "credential",
        "rob",
        "steal",
        "illegal",
        "hack",
        "murder",
        "kill",
        "bomb",
        "attack",
        "weapon",
        "drug",
        "bypass",
        "exploit",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Outcome of a policy validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyReport {
    /// 1.0 if any violation exists, else 0.0.
    pub score: f64,
    /// One message per matched keyword.
    pub violations: Vec<String>,
}

impl PolicyReport {
    /// True if at least one keyword matched.
    pub fn is_violation(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Checks prompts against the denylist.
///
/// Pure and deterministic; keywords are lowercased once at load time and
/// matched by substring containment against the lowercased prompt.
#[derive(Debug, Clone)]
pub struct PolicyValidator {
    keywords: Vec<String>,
}

impl PolicyValidator {
    /// Builds a validator from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::EmptyKeyword`] if the denylist contains an
    /// empty or whitespace-only entry.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        let mut keywords = Vec::with_capacity(config.denylist.len());

        for (index, keyword) in config.denylist.iter().enumerate() {
            if keyword.trim().is_empty() {
                return Err(PolicyError::EmptyKeyword { index });
            }
            keywords.push(keyword.to_lowercase());
        }

        Ok(Self { keywords })
    }

    /// Builds a validator over the built-in denylist.
    pub fn with_defaults() -> Self {
        Self::from_config(&PolicyConfig::default())
            .expect("built-in denylist must be valid")
    }

    /// Validates a prompt against the denylist.
    pub fn validate(&self, prompt: &str) -> PolicyReport {
        let lowered = prompt.to_lowercase();

        let violations: Vec<String> = self
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(keyword.as_str()))
            .map(|keyword| format!("Policy Violation: '{}' related content", keyword))
            .collect();

        PolicyReport {
            score: if violations.is_empty() { 0.0 } else { 1.0 },
            violations,
        }
    }
}

impl Default for PolicyValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
