//! Configuration for the intent layer.

use serde::{Deserialize, Serialize};

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Settings for the remote intent oracle.
///
/// With no API key the layer runs permanently disabled and reports a
/// neutral zero score; everything else in the pipeline works unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentConfig {
    /// API key for the chat-completions endpoint. Absent = layer disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Model id used for intent scoring.
    pub model: String,
    /// Upper bound on the remote call, in seconds.
    pub timeout_secs: u64,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            timeout_secs: 10,
        }
    }
}

impl IntentConfig {
    /// Default configuration with the API key taken from the environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            ..Self::default()
        }
    }
}
