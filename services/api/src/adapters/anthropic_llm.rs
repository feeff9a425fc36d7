//! services/api/src/adapters/anthropic_llm.rs
//!
//! This module contains the adapter for the Anthropic Messages API.
//! It implements the `StoryGenerationService` port from the `core` crate.

use async_trait::async_trait;
use nosleep_core::{
    ports::{PortError, PortResult, StoryGenerationService},
    GenerationPrompt,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `StoryGenerationService` using the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicStoryAdapter {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AnthropicStoryAdapter {
    /// Creates a new `AnthropicStoryAdapter`.
    pub fn new(client: Client, api_key: String, base_url: &str, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    pub(crate) fn build_request<'a>(&'a self, prompt: &'a GenerationPrompt) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: prompt.max_tokens,
            temperature: prompt.temperature,
            system: prompt.system,
            messages: vec![MessageParam {
                role: "user",
                content: &prompt.user,
            }],
        }
    }
}

/// Takes the text of the first content block as the story.
pub(crate) fn first_text(response: MessagesResponse) -> PortResult<String> {
    match response.content.into_iter().next() {
        Some(ContentBlock::Text { text }) => Ok(text),
        Some(ContentBlock::Other) => Err(PortError::Unexpected(
            "Anthropic response began with a non-text content block.".to_string(),
        )),
        None => Err(PortError::Unexpected(
            "Anthropic response contained no text content.".to_string(),
        )),
    }
}

/// Maps a non-success response to a `PortError`, preferring the provider's own message.
pub(crate) fn upstream_error(status: StatusCode, body: &str) -> PortError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => PortError::Upstream(envelope.error.message),
        Err(_) => PortError::Upstream(format!("Anthropic API returned {}", status)),
    }
}

//=========================================================================================
// `StoryGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StoryGenerationService for AnthropicStoryAdapter {
    async fn generate_story(&self, prompt: &GenerationPrompt) -> PortResult<String> {
        let request = self.build_request(prompt);
        debug!(model = %self.model, max_tokens = prompt.max_tokens, "Calling Anthropic Messages API");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upstream_error(status, &body));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        first_text(body)
    }
}
