//! # PromptGuard Core
//!
//! Hybrid risk-decision pipeline for screening prompts bound to an LLM
//! backend. Combines rule-based detection, a semantic intent oracle and a
//! keyword policy check into one auditable decision.
//!
//! ## Layer Coverage
//!
//! | Layer | Crate | Signal |
//! |-------|-------|--------|
//! | Pattern | `guard-detect` | Known injection phrasings, weighted by severity |
//! | Semantic | `guard-intent` | Hidden intent judged by a remote model |
//! | Policy | `guard-policy` | Forbidden keyword containment |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       PROMPTGUARD CORE                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │                   ┌──────────────────┐                          │
//! │                   │    Mitigation    │  ← Unified Facade        │
//! │                   │      Engine      │                          │
//! │                   └────────┬─────────┘                          │
//! │                            │                                    │
//! │        ┌───────────────────┼───────────────────┐                │
//! │        ▼                   ▼                   ▼                │
//! │ ┌─────────────┐    ┌─────────────┐    ┌─────────────┐           │
//! │ │   Pattern   │    │  Semantic   │    │   Policy    │           │
//! │ │  Detector   │    │   Intent    │    │  Validator  │           │
//! │ │  + Scorer   │    │    Agent    │    │             │           │
//! │ └──────┬──────┘    └──────┬──────┘    └──────┬──────┘           │
//! │        └───────────────── ▼ ─────────────────┘                  │
//! │                   ┌──────────────────┐                          │
//! │                   │    Worst-case    │                          │
//! │                   │    Aggregation   │ → Decision               │
//! │                   └──────────────────┘                          │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use guard_core::{GuardConfig, MitigationEngine};
//!
//! let engine = MitigationEngine::new(GuardConfig::from_env())?;
//! let decision = engine.analyze(&prompt).await?;
//! match decision.action {
//!     Action::Allow => forward(&decision.sanitized_prompt),
//!     Action::Sanitize | Action::Rewrite => forward(&decision.sanitized_prompt),
//!     Action::Block => reject(&decision.explanation),
//! }
//! ```
//!
//! ## Security Notes
//!
//! - The three layers score independently; the final risk is their maximum,
//!   so one confident signal is enough to escalate.
//! - The remote intent call is the only effectful layer. It is bounded by a
//!   timeout and every failure degrades to a zero score for that call; it
//!   can never abort an analysis.
//! - Configuration errors fail at load time. `analyze` is total for any
//!   non-empty prompt.

pub mod aggregate;
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod sanitize;

pub use aggregate::{aggregate, LayerScores};
pub use config::{DecisionThresholds, GuardConfig};
pub use decision::{
    Action, AgentReport, Decision, DecisionMetrics, LayerResults, PatternLayer, TimelineStep,
};
pub use engine::MitigationEngine;
pub use error::GuardError;
pub use sanitize::{Sanitizer, REDACTION_MARKER};

// Re-export layer types callers need alongside a Decision
pub use guard_detect::{AttackCategory, RiskBreakdown, RiskLevel, Severity, TaxonomyEntry};
pub use guard_intent::{IntentConfig, IntentReport, SemanticIntentAgent};
pub use guard_policy::PolicyReport;

/// Core result type for pipeline operations.
pub type Result<T> = std::result::Result<T, GuardError>;
