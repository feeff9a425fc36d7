//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::{
    config::{Config, ConfigError},
    error::RelayError,
};
use nosleep_core::ports::StoryGenerationService;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// Handlers hold no other state; each request starts from here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when the provider credential is not configured.
    pub generator: Option<Arc<dyn StoryGenerationService>>,
}

impl AppState {
    pub fn new(config: Arc<Config>, generator: Option<Arc<dyn StoryGenerationService>>) -> Self {
        Self { config, generator }
    }

    /// The configured generator, or the configuration fault every request reports
    /// while the credential is missing.
    pub fn generator(&self) -> Result<Arc<dyn StoryGenerationService>, RelayError> {
        self.generator.clone().ok_or_else(|| {
            ConfigError::MissingVar(self.config.provider.credential_var().to_string()).into()
        })
    }
}
