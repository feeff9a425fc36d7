//! services/api/src/adapters/openai_llm.rs
//!
//! This module contains the adapter for an OpenAI-compatible chat completion LLM.
//! It implements the `StoryGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use nosleep_core::{
    ports::{PortError, PortResult, StoryGenerationService},
    GenerationPrompt,
};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `StoryGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiStoryAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiStoryAdapter {
    /// Creates a new `OpenAiStoryAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    pub(crate) fn build_request(
        &self,
        prompt: &GenerationPrompt,
    ) -> PortResult<CreateChatCompletionRequest> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user.as_str())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(prompt.max_tokens)
            .temperature(prompt.temperature)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

//=========================================================================================
// `StoryGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StoryGenerationService for OpenAiStoryAdapter {
    async fn generate_story(&self, prompt: &GenerationPrompt) -> PortResult<String> {
        let request = self.build_request(prompt)?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| match e {
                OpenAIError::ApiError(api) => PortError::Upstream(api.message),
                other => PortError::Unexpected(other.to_string()),
            })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected(
                    "Story generation LLM response contained no text content.".to_string(),
                )
            })
    }
}
