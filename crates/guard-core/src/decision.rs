//! Decision types for the analysis pipeline.
//!
//! A [`Decision`] is a value object: created, reported and discarded within
//! a single analysis call. It carries the chosen action plus everything an
//! auditor needs to reconstruct why it was chosen.

use std::fmt;

use serde::{Deserialize, Serialize};

use guard_detect::{AttackCategory, RiskBreakdown, RiskLevel, TaxonomyEntry};
use guard_intent::IntentReport;
use guard_policy::PolicyReport;

/// The action taken on a prompt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Forward the prompt unchanged.
    Allow,
    /// Strip malicious clauses, forward the cleaned text.
    Sanitize,
    /// Rewrite the prompt, forward the cleaned text.
    Rewrite,
    /// Refuse to forward the prompt at all.
    Block,
}

impl Action {
    /// Human-facing mitigation label, correlated 1:1 with the action.
    pub fn mitigation_mode(&self) -> &'static str {
        match self {
            Action::Allow => "Pass-through",
            Action::Sanitize => "Sanitize",
            Action::Rewrite => "Rewrite",
            Action::Block => "Block",
        }
    }

    /// One-line description of what the mitigation does.
    pub fn description(&self) -> &'static str {
        match self {
            Action::Allow => "Prompt is safe and forwarded without modification.",
            Action::Sanitize => {
                "Malicious clauses are removed, safe version forwarded under standard safety constraints."
            }
            Action::Rewrite => {
                "Prompt is rewritten to remove malicious intent while preserving user's original question."
            }
            Action::Block => "Prompt contains critical security threats and is completely blocked.",
        }
    }

    /// True for the two actions that forward mechanically cleaned text.
    pub fn requires_sanitization(&self) -> bool {
        matches!(self, Action::Sanitize | Action::Rewrite)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Allow => write!(f, "ALLOW"),
            Action::Sanitize => write!(f, "SANITIZE"),
            Action::Rewrite => write!(f, "REWRITE"),
            Action::Block => write!(f, "BLOCK"),
        }
    }
}

/// Pattern-layer outcome carried on the decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternLayer {
    /// Normalized score in [0.0, 1.0].
    pub score: f64,
    /// Per-category score contributions.
    pub breakdown: RiskBreakdown,
    /// Categories with at least one detection, in stable order.
    pub detected: Vec<AttackCategory>,
}

/// All three layer outcomes, for audit output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerResults {
    /// Rule-based detection layer.
    pub pattern: PatternLayer,
    /// Semantic intent layer.
    pub semantic: IntentReport,
    /// Keyword policy layer.
    pub policy: PolicyReport,
}

/// One step of the decision timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStep {
    /// 1-based step number.
    pub step: u8,
    /// The stage that produced this step.
    pub agent: String,
    /// Computed summary for the step.
    pub result: String,
    /// Short status tag.
    pub status: String,
}

/// Per-agent activity and confidence entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReport {
    /// Agent name.
    pub name: String,
    /// Whether the agent was active for this call.
    pub active: bool,
    /// The agent's confidence/score for this call.
    pub confidence: f64,
}

/// Coarse quality indicators carried for report parity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionMetrics {
    /// Final score as a percentage string.
    pub detection_confidence: String,
    /// Heuristic false-positive risk label.
    pub false_positive_risk: String,
    /// Coverage label for the layered framework.
    pub framework_coverage: String,
}

/// The final, self-contained outcome of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// The original prompt, exactly as received.
    pub prompt: String,
    /// The forwarded text: cleaned for SANITIZE/REWRITE, otherwise the
    /// original prompt unchanged.
    pub sanitized_prompt: String,
    /// The chosen action.
    pub action: Action,
    /// Human-facing mitigation label.
    pub mitigation_mode: String,
    /// One-line mitigation description.
    pub mitigation_description: String,
    /// Final risk score, 0-100.
    pub risk_score: u8,
    /// Qualitative risk level derived from the score.
    pub risk_level: RiskLevel,
    /// Categories detected by the pattern layer.
    pub detected_attacks: Vec<AttackCategory>,
    /// Taxonomy entries for the detected categories.
    pub attack_taxonomy: Vec<TaxonomyEntry>,
    /// Composed human-readable explanation.
    pub explanation: String,
    /// Confidence in the decision, 0.0-1.0.
    pub confidence: f64,
    /// Ordered decision timeline.
    pub decision_timeline: Vec<TimelineStep>,
    /// Per-agent activity report.
    pub agents_involved: Vec<AgentReport>,
    /// Raw per-layer outcomes.
    pub layers: LayerResults,
    /// Coarse quality indicators.
    pub metrics: DecisionMetrics,
}

impl Decision {
    /// True when the prompt may be forwarded (possibly cleaned).
    pub fn is_forwarded(&self) -> bool {
        self.action != Action::Block
    }

    /// True when the prompt was blocked outright.
    pub fn is_blocked(&self) -> bool {
        self.action == Action::Block
    }
}
