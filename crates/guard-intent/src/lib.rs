//! # PromptGuard Intent
//!
//! The semantic intent layer: delegates to a remote language model that
//! audits prompts for hidden malicious intent, and contains every failure
//! mode of that delegation locally.
//!
//! ## Degradation contract
//!
//! The rest of the pipeline never sees an error from this crate at
//! analysis time:
//!
//! - no API key configured: the layer reports `(0.0, disabled)` forever
//! - transport failure, malformed payload, timeout: `(0.0, diagnostic)`
//!   for that single call, no retry
//!
//! The oracle sits behind the narrow [`IntentOracle`] trait so tests can
//! replace the HTTP client with a deterministic stub.

pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod oracle;
pub mod remote;

pub use agent::{IntentReport, SemanticIntentAgent};
pub use chat::ChatClient;
pub use config::{IntentConfig, API_KEY_ENV};
pub use error::IntentError;
pub use oracle::{IntentAssessment, IntentOracle};
pub use remote::RemoteIntentClient;
