//! crates/nosleep_client/src/error.rs
//!
//! The single error type surfaced to the UI. Its `Display` is the message shown
//! to the user.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The relay reported a failure, either as a JSON error body or an HTML page.
    #[error("{0}")]
    Server(String),

    /// The relay answered with something that is neither JSON nor HTML.
    #[error("Invalid response format: {0}...")]
    ResponseFormat(String),

    /// A successful JSON body without a `story` string.
    #[error("Invalid response format: missing story")]
    MissingStory,

    /// The request never produced a response (connection refused, DNS...).
    #[error("{0}")]
    Transport(String),
}

impl BridgeError {
    /// Normalizes a transport failure, falling back to a generic message.
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            BridgeError::Transport("An unexpected error occurred".to_string())
        } else {
            BridgeError::Transport(message)
        }
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(e: reqwest::Error) -> Self {
        BridgeError::transport(e.to_string())
    }
}
