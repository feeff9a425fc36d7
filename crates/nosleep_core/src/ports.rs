//! crates/nosleep_core/src/ports.rs
//!
//! Defines the service contract between the relay and the completion provider.
//! The relay only ever sees this trait, so the provider can be swapped or mocked.

use async_trait::async_trait;

use crate::prompt::GenerationPrompt;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, provider).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The provider answered, but with an error of its own (auth, quota, overload...).
    #[error("Upstream provider error: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The underlying message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            PortError::Upstream(message) | PortError::Unexpected(message) => message,
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait StoryGenerationService: Send + Sync {
    /// Makes exactly one completion call and returns the text of the first content block.
    async fn generate_story(&self, prompt: &GenerationPrompt) -> PortResult<String>;
}
