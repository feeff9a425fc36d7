//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which deployment the relay runs in. Development exposes error details to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// The completion provider stories are generated with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionProvider {
    Anthropic,
    OpenAi,
}

impl CompletionProvider {
    /// The environment variable holding this provider's credential.
    pub fn credential_var(&self) -> &'static str {
        match self {
            CompletionProvider::Anthropic => "ANTHROPIC_API_KEY",
            CompletionProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            CompletionProvider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            CompletionProvider::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub environment: Environment,
    pub provider: CompletionProvider,
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub openai_api_key: Option<String>,
    pub story_model: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // NODE_ENV is honoured for deployments that still set it.
        let environment = match lookup("APP_ENV").or_else(|| lookup("NODE_ENV")) {
            Some(value) if value.eq_ignore_ascii_case("development") => Environment::Development,
            _ => Environment::Production,
        };

        // --- Load Provider Settings ---
        let provider = match lookup("COMPLETION_PROVIDER")
            .unwrap_or_else(|| "anthropic".to_string())
            .to_lowercase()
            .as_str()
        {
            "anthropic" => CompletionProvider::Anthropic,
            "openai" => CompletionProvider::OpenAi,
            other => {
                return Err(ConfigError::InvalidValue(
                    "COMPLETION_PROVIDER".to_string(),
                    format!("'{}' is not one of anthropic, openai", other),
                ))
            }
        };

        // --- Load API Keys (as optional) ---
        // A missing key is reported per request, not at startup.
        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|key| !key.is_empty());
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.is_empty());

        let anthropic_base_url = lookup("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string());
        let story_model =
            lookup("STORY_MODEL").unwrap_or_else(|| provider.default_model().to_string());

        Ok(Self {
            bind_address,
            log_level,
            environment,
            provider,
            anthropic_api_key,
            anthropic_base_url,
            openai_api_key,
            story_model,
        })
    }

    /// The credential for the configured provider.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        let key = match self.provider {
            CompletionProvider::Anthropic => self.anthropic_api_key.as_deref(),
            CompletionProvider::OpenAi => self.openai_api_key.as_deref(),
        };
        key.ok_or_else(|| ConfigError::MissingVar(self.provider.credential_var().to_string()))
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
