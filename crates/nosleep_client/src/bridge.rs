//! crates/nosleep_client/src/bridge.rs
//!
//! The request/response bridge between the client and the relay. One POST per call,
//! and every outcome is normalized into either the story text or a [`BridgeError`].

use async_trait::async_trait;
use nosleep_core::GenerationRequest;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::error;

use crate::{error::BridgeError, html};

/// Path the relay is mounted on by the original hosting setup.
pub const DEFAULT_RELAY_PATH: &str = "/.netlify/functions/generate-story";

/// Number of body characters quoted back when the response cannot be understood.
const BODY_PREVIEW_CHARS: usize = 100;

/// The client's view of the relay.
#[async_trait]
pub trait StoryRelayService: Send + Sync {
    async fn request_story(&self, request: &GenerationRequest) -> Result<String, BridgeError>;
}

/// A [`StoryRelayService`] that talks to the relay over HTTP.
#[derive(Clone)]
pub struct HttpStoryBridge {
    client: Client,
    endpoint: String,
}

impl HttpStoryBridge {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Targets the relay at its default path under `base_url`.
    pub fn for_base_url(base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), DEFAULT_RELAY_PATH);
        Self::new(Client::new(), endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StoryRelayService for HttpStoryBridge {
    async fn request_story(&self, request: &GenerationRequest) -> Result<String, BridgeError> {
        let result: Result<String, BridgeError> = async {
            let response = self
                .client
                .post(&self.endpoint)
                .json(request)
                .send()
                .await?;

            let status = response.status();
            // Read as text first; error pages in front of the relay are often HTML.
            let body = response.text().await?;
            interpret_response(status, &body)
        }
        .await;

        if let Err(e) = &result {
            error!("Story generation error: {}", e);
        }
        result
    }
}

/// Turns a relay response into the story text or a user-facing error.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<String, BridgeError> {
    match serde_json::from_str::<Value>(body) {
        Ok(data) => {
            if !status.is_success() {
                let message = data
                    .get("error")
                    .and_then(Value::as_str)
                    .filter(|message| !message.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
                return Err(BridgeError::Server(message));
            }

            data.get("story")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(BridgeError::MissingStory)
        }
        Err(_) if html::looks_like_html(body) => {
            let message = match html::extract_fragment(body) {
                Some(fragment) => format!("Server Error: {}", fragment),
                None => format!(
                    "Server Error: {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default()
                )
                .trim_end()
                .to_string(),
            };
            Err(BridgeError::Server(message))
        }
        Err(_) => Err(BridgeError::ResponseFormat(
            body.chars().take(BODY_PREVIEW_CHARS).collect(),
        )),
    }
}
