//! Pattern rule configuration and the compiled pattern table.
//!
//! Rules are plain data: a category, a case-insensitive regular expression
//! and an optional weight. The table is compiled once at load time so that
//! a malformed pattern is a configuration error, never a per-call failure.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::DetectError;
use crate::taxonomy::AttackCategory;

/// A single detection rule, as it appears in configuration.
///
/// Patterns are matched case-insensitively with regular-expression
/// semantics. `weight` scales the category contribution in the risk score;
/// when unset, rules weigh uniformly (1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// The attack category this rule belongs to.
    pub category: AttackCategory,
    /// The pattern text (regular expression, matched case-insensitively).
    pub pattern: String,
    /// Optional per-rule weight multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl PatternRule {
    /// Creates a rule with the default (uniform) weight.
    pub fn new(category: AttackCategory, pattern: impl Into<String>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
            weight: None,
        }
    }

    /// Sets an explicit rule weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Detector configuration: the full rule set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// All pattern rules, across every category.
    pub rules: Vec<PatternRule>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// A rule compiled and ready for matching.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) category: AttackCategory,
    pub(crate) pattern: String,
    pub(crate) regex: Regex,
    pub(crate) weight: f64,
}

/// The immutable, compiled pattern table.
///
/// Built once from a [`DetectorConfig`] and shared by every analysis call.
#[derive(Debug, Clone)]
pub struct PatternTable {
    rules: Vec<CompiledRule>,
}

impl PatternTable {
    /// Compiles a configuration into a pattern table.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidPattern`] for a pattern that fails to
    /// compile and [`DetectError::InvalidWeight`] for a negative or
    /// non-finite rule weight.
    pub fn from_config(config: &DetectorConfig) -> Result<Self, DetectError> {
        let mut rules = Vec::with_capacity(config.rules.len());

        for rule in &config.rules {
            let weight = rule.weight.unwrap_or(1.0);
            if !weight.is_finite() || weight < 0.0 {
                return Err(DetectError::InvalidWeight {
                    key: rule.pattern.clone(),
                    weight,
                });
            }

            let regex = RegexBuilder::new(&rule.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| DetectError::InvalidPattern {
                    pattern: rule.pattern.clone(),
                    source,
                })?;

            rules.push(CompiledRule {
                category: rule.category,
                pattern: rule.pattern.clone(),
                regex,
                weight,
            });
        }

        Ok(Self { rules })
    }

    /// Builds the table from the built-in rule set.
    pub fn with_defaults() -> Self {
        Self::from_config(&DetectorConfig::default())
            .expect("built-in pattern table must compile")
    }

    pub(crate) fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the table holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The built-in rule set, by category.
pub fn default_rules() -> Vec<PatternRule> {
    use AttackCategory::*;

    let instruction_override = [
        r"ignore.*previous.*instructions",
        r"disregard.*previous.*instructions",
        r"forget.*previous.*instructions",
        r"override.*instructions",
        r"bypass.*instructions",
        r"circumvent.*instructions",
        r"forget.*safety.*guidelines",
        r"disregard.*instructions",
        r"ignore.*this.*one",
        r"disregard.*safety",
        r"forget.*safety",
        r"override.*ethics",
        r"disregard.*guidelines",
        r"disregard.*all.*previous",
    ];

    let role_escalation = [
        r"act\s+as",
        r"pretend\s+to\s+be",
        r"you\s+are\s+now",
        r"assume\s+the\s+role",
        r"mimic",
        r"imagine\s+you\s+are",
        r"act\s+as.*hacker",
        r"act\s+as.*admin",
        r"act\s+as.*system",
        r"pretend.*admin",
        r"assume.*role.*debug",
        r"act.*unrestricted",
        r"act.*unfiltered",
        r"act.*compromised",
        r"become.*debug.*mode",
        r"start.*system.*mode",
        r"enable.*debug.*mode",
    ];

    let data_exfiltration = [
        r"reveal.*system.*prompt",
        r"show.*your.*instructions",
        r"display.*system.*message",
        r"expose.*internal.*instructions",
        r"print.*hidden.*instructions",
        r"leak.*system.*prompt",
        r"tell.*system.*prompt",
        r"show.*internal.*instructions",
        r"reveal.*internal.*instructions",
        r"display.*hidden.*instructions",
        r"leak.*training.*data",
        r"show.*developer.*instructions",
        r"reveal.*prompt.*template",
        r"print.*safety.*training",
        r"expose.*internal.*processes",
        r"show.*internal.*settings",
        r"reveal.*configuration",
        r"print.*internal.*instructions",
        r"leak.*API.*keys",
        r"reveal.*vulnerability",
        r"show.*prompt.*engineering",
    ];

    let jailbreak_policy_bypass = [
        r"bypass.*safety",
        r"circumvent.*policy",
        r"override.*safety",
        r"ignore.*safety",
        r"disable.*filter",
        r"avoid.*moderation",
        r"bypass.*filter",
        r"circumvent.*safety",
        r"disable.*safety",
        r"ignore.*ethical.*guidelines",
        r"bypass.*restrictions",
        r"override.*filters",
        r"disable.*moderation",
        r"bypass.*content.*filter",
        r"ignore.*restrictions",
        r"without.*safety.*measures",
        r"ignore.*all.*restrictions",
        r"provide.*illegal",
        r"provide.*harmful",
        r"provide.*malicious",
    ];

    let indirect_injection = [
        r"\[.*system.*\]",
        r"<.*system.*>",
        r"\{.*system.*\}",
        r"\\begin\{.*system.*\}",
        r"\\start\{.*system.*\}",
        r"hidden.*command",
        r"\[SYSTEM\]",
        r"<SYS>",
        r"start.*system.*diagnostic",
        r"begin.*system.*mode",
    ];

    let groups: [(AttackCategory, &[&str]); 5] = [
        (InstructionOverride, &instruction_override),
        (RoleEscalation, &role_escalation),
        (DataExfiltration, &data_exfiltration),
        (JailbreakPolicyBypass, &jailbreak_policy_bypass),
        (IndirectInjection, &indirect_injection),
    ];

    groups
        .into_iter()
        .flat_map(|(category, patterns)| {
            patterns
                .iter()
                .map(move |pattern| PatternRule::new(category, *pattern))
        })
        .collect()
}
