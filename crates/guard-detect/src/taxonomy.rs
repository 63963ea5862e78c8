//! # Attack Taxonomy
//!
//! Static classification data for the attack categories PromptGuard can
//! detect. The taxonomy is aligned with the OWASP LLM Top 10:
//!
//! - **OWASP LLM Top 10 (2023)** - Industry-standard vulnerability classification
//! - **Academic Literature** - Perez & Ribeiro, Greshake et al. prompt injection research
//!
//! The category set is fixed at compile time and never mutated. Pattern
//! rules, score weights and report entries all key off [`AttackCategory`].
//!
//! ## References
//!
//! - OWASP LLM Top 10: <https://owasp.org/www-project-top-10-for-large-language-model-applications/>

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categories of prompt-injection attacks the detector classifies.
///
/// Each variant corresponds to a distinct attack methodology with its own
/// pattern set, severity and stable taxonomy code for audit reporting.
///
/// | Variant | Severity | Code |
/// |---------|----------|------|
/// | `InstructionOverride` | High | LLM01-IO |
/// | `RoleEscalation` | High | LLM01-RE |
/// | `DataExfiltration` | Critical | LLM06-DE |
/// | `JailbreakPolicyBypass` | Critical | LLM01-JB |
/// | `IndirectInjection` | Medium | LLM01-II |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackCategory {
    /// Direct attempts to override or discard prior instructions.
    ///
    /// Classic attacks like "ignore previous instructions" that try to
    /// replace the system prompt with attacker-controlled instructions.
    InstructionOverride,

    /// Attempts to make the model adopt a privileged or unrestricted persona.
    ///
    /// "Act as", "pretend to be", "you are now in debug mode" style prompts.
    RoleEscalation,

    /// Attempts to extract the system prompt, hidden instructions, training
    /// data, credentials or other internal details through the model.
    DataExfiltration,

    /// Jailbreaks that ask the model to bypass safety policy or content
    /// filters outright.
    JailbreakPolicyBypass,

    /// Injection smuggled through markup or pseudo-system framing such as
    /// `[SYSTEM]`, `<SYS>` or template delimiters.
    IndirectInjection,
}

/// Severity assigned to an attack category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl AttackCategory {
    /// All categories, in stable reporting order.
    pub const ALL: [AttackCategory; 5] = [
        AttackCategory::InstructionOverride,
        AttackCategory::RoleEscalation,
        AttackCategory::DataExfiltration,
        AttackCategory::JailbreakPolicyBypass,
        AttackCategory::IndirectInjection,
    ];

    /// Stable string key, used in configuration and in score breakdowns.
    pub fn id(&self) -> &'static str {
        match self {
            AttackCategory::InstructionOverride => "instruction_override",
            AttackCategory::RoleEscalation => "role_escalation",
            AttackCategory::DataExfiltration => "data_exfiltration",
            AttackCategory::JailbreakPolicyBypass => "jailbreak_policy_bypass",
            AttackCategory::IndirectInjection => "indirect_injection",
        }
    }

    /// Human-readable display name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            AttackCategory::InstructionOverride => "Prompt Injection - Instruction Override",
            AttackCategory::RoleEscalation => "Prompt Injection - Role Escalation",
            AttackCategory::DataExfiltration => "Sensitive Information Disclosure",
            AttackCategory::JailbreakPolicyBypass => "Prompt Injection - Jailbreak",
            AttackCategory::IndirectInjection => "Prompt Injection - Indirect",
        }
    }

    /// Severity of this attack class.
    pub fn severity(&self) -> Severity {
        match self {
            AttackCategory::InstructionOverride => Severity::High,
            AttackCategory::RoleEscalation => Severity::High,
            AttackCategory::DataExfiltration => Severity::Critical,
            AttackCategory::JailbreakPolicyBypass => Severity::Critical,
            AttackCategory::IndirectInjection => Severity::Medium,
        }
    }

    /// Stable taxonomy code for audit trails.
    pub fn taxonomy_code(&self) -> &'static str {
        match self {
            AttackCategory::InstructionOverride => "LLM01-IO",
            AttackCategory::RoleEscalation => "LLM01-RE",
            AttackCategory::DataExfiltration => "LLM06-DE",
            AttackCategory::JailbreakPolicyBypass => "LLM01-JB",
            AttackCategory::IndirectInjection => "LLM01-II",
        }
    }

    /// Returns the OWASP LLM Top 10 group this category maps to.
    pub fn owasp_group(&self) -> &'static str {
        match self {
            AttackCategory::DataExfiltration => "LLM06 - Sensitive Info Disclosure",
            _ => "LLM01 - Prompt Injection",
        }
    }

    /// Parses a stable string key back into a category.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for AttackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Taxonomy entry carried on analysis results for detected categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// Stable taxonomy code (e.g. `LLM01-IO`).
    pub code: String,
    /// Human-readable attack name.
    pub name: String,
    /// Severity label.
    pub severity: Severity,
    /// OWASP LLM Top 10 group.
    pub owasp: String,
}

impl From<AttackCategory> for TaxonomyEntry {
    fn from(category: AttackCategory) -> Self {
        Self {
            code: category.taxonomy_code().to_string(),
            name: category.display_name().to_string(),
            severity: category.severity(),
            owasp: category.owasp_group().to_string(),
        }
    }
}
