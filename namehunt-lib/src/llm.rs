//! Minimal client for an OpenAI-compatible chat-completion endpoint.
//!
//! Shared by the name generator and the categorizer. One prompt in, one
//! text completion out; schema constraints are expressed in the prompt and
//! enforced by the callers' parsers.

use crate::error::NameHuntError;
use crate::types::LlmConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Clone)]
pub(crate) struct LlmClient {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub(crate) fn from_config(config: &LlmConfig) -> Result<Self, NameHuntError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                NameHuntError::network_with_source("Failed to create LLM HTTP client", e.to_string())
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Send one user prompt and return the first completion's text.
    pub(crate) async fn complete(&self, prompt: &str) -> Result<String, NameHuntError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.8,
        };

        let mut builder = self.http_client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            NameHuntError::network_with_source("text service request failed", e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(NameHuntError::network(format!(
                "text service returned HTTP {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| NameHuntError::parse(format!("invalid text service response: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| NameHuntError::parse("text service response contained no choices"))
    }
}
