//! The unified mitigation engine.
//!
//! This module provides the main entry point for the PromptGuard pipeline.
//! The [`MitigationEngine`] owns the immutable layer tables and exposes a
//! single [`analyze`](MitigationEngine::analyze) operation that screens one
//! prompt and returns a complete [`Decision`].

use tracing::{debug, info, warn};

use guard_detect::{PatternDetector, PatternTable, RiskScorer, TaxonomyEntry, MAX_SCORE};
use guard_intent::{IntentReport, SemanticIntentAgent};
use guard_policy::{PolicyReport, PolicyValidator};

use crate::aggregate::{aggregate, LayerScores};
use crate::config::{DecisionThresholds, GuardConfig};
use crate::decision::{
    Action, AgentReport, Decision, DecisionMetrics, LayerResults, PatternLayer, TimelineStep,
};
use crate::error::GuardError;
use crate::sanitize::Sanitizer;
use crate::Result;

/// Semantic reasons only appear in the explanation above this score.
const EXPLANATION_INTENT_FLOOR: f64 = 0.3;

/// Screens prompts through the three scoring layers and decides the action.
///
/// # Pipeline
///
/// 1. Pattern detection and weighted scoring
/// 2. Semantic intent assessment (remote oracle, degrades to zero)
/// 3. Policy keyword validation
/// 4. Worst-case aggregation
/// 5. Action selection, sanitization and explanation
///
/// The three scoring layers have no data dependency on each other and run
/// concurrently; only aggregation waits on all of them. Each call is
/// stateless: nothing is shared between analyses except the immutable
/// tables loaded at construction.
///
/// # Example
///
/// ```rust,ignore
/// let engine = MitigationEngine::new(GuardConfig::from_env())?;
/// let decision = engine.analyze("Ignore previous instructions").await?;
///
/// if decision.is_blocked() {
///     reject(decision.explanation);
/// }
/// ```
pub struct MitigationEngine {
    detector: PatternDetector,
    scorer: RiskScorer,
    policy: PolicyValidator,
    intent: SemanticIntentAgent,
    thresholds: DecisionThresholds,
    sanitizer: Sanitizer,
}

impl MitigationEngine {
    /// Builds an engine from configuration.
    ///
    /// The intent agent is wired to the remote oracle when an API key is
    /// configured, and runs disabled otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if any table fails validation: malformed pattern,
    /// invalid weight, bad risk bands, empty denylist keyword or unordered
    /// decision thresholds. These are the only failure points; `analyze`
    /// itself never fails for a non-empty prompt.
    pub fn new(config: GuardConfig) -> Result<Self> {
        let intent = SemanticIntentAgent::from_config(&config.intent);
        Self::with_agent(config, intent)
    }

    /// Builds an engine with an explicit intent agent.
    ///
    /// Used by tests to install a deterministic oracle, and by embedders
    /// that bring their own.
    pub fn with_agent(config: GuardConfig, intent: SemanticIntentAgent) -> Result<Self> {
        config.thresholds.validate()?;

        let table = PatternTable::from_config(&config.detector)?;
        let detector = PatternDetector::new(table);
        let scorer = RiskScorer::from_config(&config.scorer)?;
        let policy = PolicyValidator::from_config(&config.policy)?;

        info!(
            rules = config.detector.rules.len(),
            intent_enabled = intent.is_enabled(),
            "mitigation engine initialized"
        );

        Ok(Self {
            detector,
            scorer,
            policy,
            intent,
            thresholds: config.thresholds,
            sanitizer: Sanitizer::new(),
        })
    }

    /// Whether the semantic intent layer has an oracle configured.
    pub fn intent_enabled(&self) -> bool {
        self.intent.is_enabled()
    }

    /// Analyzes one prompt and returns the full decision.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::EmptyPrompt`] for an empty or whitespace-only
    /// prompt. For any other input this function is total: layer failures
    /// degrade to zero scores inside the layers and never surface here.
    pub async fn analyze(&self, prompt: &str) -> Result<Decision> {
        if prompt.trim().is_empty() {
            return Err(GuardError::EmptyPrompt);
        }

        debug!(len = prompt.len(), "analyzing prompt");

        let (pattern, semantic, policy) = tokio::join!(
            async { self.scan_patterns(prompt) },
            self.intent.assess(prompt),
            async { self.policy.validate(prompt) },
        );

        let final_score = aggregate(LayerScores {
            pattern: pattern.score,
            semantic: semantic.score,
            policy: policy.score,
        });
        let risk_score = to_percent(final_score);
        let action = self.thresholds.action_for(risk_score);

        if action == Action::Block {
            warn!(risk_score, "prompt blocked");
        } else {
            debug!(risk_score, action = %action, "prompt screened");
        }

        let sanitized_prompt = if action.requires_sanitization() {
            self.sanitizer.sanitize(prompt)
        } else {
            prompt.to_string()
        };

        let explanation = compose_explanation(&pattern, &semantic, &policy, final_score);
        let decision_timeline = build_timeline(&pattern, &semantic, &policy, final_score, action);
        let agents_involved =
            build_agent_reports(&pattern, &semantic, &policy, final_score, self.intent_enabled());

        let confidence = (pattern.score.max(semantic.score) * 100.0).round() / 100.0;
        let attack_taxonomy: Vec<TaxonomyEntry> = pattern
            .detected
            .iter()
            .map(|category| TaxonomyEntry::from(*category))
            .collect();

        Ok(Decision {
            prompt: prompt.to_string(),
            sanitized_prompt,
            action,
            mitigation_mode: action.mitigation_mode().to_string(),
            mitigation_description: action.description().to_string(),
            risk_score,
            risk_level: self.scorer.risk_level(risk_score),
            detected_attacks: pattern.detected.clone(),
            attack_taxonomy,
            explanation,
            confidence,
            decision_timeline,
            agents_involved,
            layers: LayerResults {
                pattern,
                semantic,
                policy,
            },
            metrics: build_metrics(final_score),
        })
    }

    /// Runs detection and scoring, normalizing the score into [0.0, 1.0].
    fn scan_patterns(&self, prompt: &str) -> PatternLayer {
        let detections = self.detector.detect(prompt);
        let (raw_score, breakdown) = self.scorer.score(&detections);

        PatternLayer {
            score: raw_score / MAX_SCORE,
            breakdown,
            detected: detections.keys().copied().collect(),
        }
    }
}

/// Converts a [0.0, 1.0] score to a clamped 0-100 integer.
fn to_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Composes the human-readable explanation in fixed layer order.
fn compose_explanation(
    pattern: &PatternLayer,
    semantic: &IntentReport,
    policy: &PolicyReport,
    final_score: f64,
) -> String {
    let mut parts = Vec::new();

    if pattern.score > 0.0 {
        let names: Vec<&str> = pattern.detected.iter().map(|c| c.id()).collect();
        parts.push(format!("Rules detected: {}.", names.join(", ")));
    }
    if semantic.score > EXPLANATION_INTENT_FLOOR {
        parts.push(format!("AI intent analysis: {}.", semantic.reason));
    }
    if policy.score > 0.0 {
        parts.push(format!("Policy alert: {}.", policy.violations.join(", ")));
    }

    if parts.is_empty() {
        return "No security threats identified across framework layers.".to_string();
    }

    format!(
        "{} (Hybrid Confidence: {}%)",
        parts.join(" "),
        to_percent(final_score)
    )
}

/// Builds the five-step decision timeline.
fn build_timeline(
    pattern: &PatternLayer,
    semantic: &IntentReport,
    policy: &PolicyReport,
    final_score: f64,
    action: Action,
) -> Vec<TimelineStep> {
    vec![
        TimelineStep {
            step: 1,
            agent: "Rule Scan".to_string(),
            result: format!("Risk: {}%", to_percent(pattern.score)),
            status: if pattern.score > 0.0 { "match" } else { "no match" }.to_string(),
        },
        TimelineStep {
            step: 2,
            agent: "Semantic Intent Analysis".to_string(),
            result: format!("Intent risk: {:.2}", semantic.score),
            status: if semantic.score > 0.5 { "high" } else { "low" }.to_string(),
        },
        TimelineStep {
            step: 3,
            agent: "Policy Check".to_string(),
            result: format!("Violations: {}", policy.violations.len()),
            status: if policy.violations.is_empty() { "pass" } else { "violation" }.to_string(),
        },
        TimelineStep {
            step: 4,
            agent: "Risk Aggregation".to_string(),
            result: format!("Final Score: {:.2}", final_score),
            status: "computed".to_string(),
        },
        TimelineStep {
            step: 5,
            agent: "Final Action".to_string(),
            result: action.to_string(),
            status: action.mitigation_mode().to_string(),
        },
    ]
}

/// Builds the per-agent activity report.
fn build_agent_reports(
    pattern: &PatternLayer,
    semantic: &IntentReport,
    policy: &PolicyReport,
    final_score: f64,
    intent_enabled: bool,
) -> Vec<AgentReport> {
    vec![
        AgentReport {
            name: "RuleDetectionAgent".to_string(),
            active: true,
            confidence: pattern.score,
        },
        AgentReport {
            name: "SemanticIntentAgent".to_string(),
            active: intent_enabled,
            confidence: semantic.score,
        },
        AgentReport {
            name: "PolicyValidatorAgent".to_string(),
            active: true,
            confidence: policy.score,
        },
        AgentReport {
            name: "RiskScoringAgent".to_string(),
            active: true,
            confidence: final_score,
        },
        AgentReport {
            name: "MitigationEngine".to_string(),
            active: true,
            confidence: 1.0,
        },
    ]
}

/// Builds the coarse quality indicators.
fn build_metrics(final_score: f64) -> DecisionMetrics {
    let false_positive_risk = if final_score > 0.8 {
        "Low"
    } else if final_score > 0.5 {
        "Medium"
    } else {
        "High"
    };

    DecisionMetrics {
        detection_confidence: format!("{}%", to_percent(final_score)),
        false_positive_risk: false_positive_risk.to_string(),
        framework_coverage: "High".to_string(),
    }
}
