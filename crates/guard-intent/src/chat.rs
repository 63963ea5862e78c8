//! Plain chat-completion client for the comparison/demo path.
//!
//! Not part of the scoring pipeline. Used to fetch a direct model response
//! so it can be shown next to the framework-protected response.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::IntentConfig;
use crate::error::IntentError;

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<UserMessage>,
}

#[derive(Debug, Serialize)]
struct UserMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Free-form completion client on the same OpenAI-compatible API.
pub struct ChatClient {
    auth_header: String,
    client: Client,
    base_url: String,
    model: String,
}

impl ChatClient {
    /// Creates a client from configuration; `None` without an API key.
    pub fn from_config(config: &IntentConfig) -> Option<Self> {
        let api_key = config.api_key.as_deref()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(30)))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Some(Self {
            auth_header: format!("Bearer {api_key}"),
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Sends a single-turn completion request and returns the response text.
    pub async fn complete_chat(&self, prompt: &str) -> Result<String, IntentError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![UserMessage {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", &self.auth_header)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: CompletionResponse = response
            .json()
            .await
            .map_err(|e| IntentError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .ok_or(IntentError::EmptyResponse)?
            .message
            .content
            .ok_or_else(|| IntentError::MalformedResponse("choice without content".into()))
    }
}
