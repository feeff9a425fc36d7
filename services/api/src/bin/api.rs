//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{AnthropicStoryAdapter, OpenAiStoryAdapter},
    config::{CompletionProvider, Config},
    error::ApiError,
    web::{self, rest::ApiDoc, state::AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use axum::Router;
use nosleep_core::ports::StoryGenerationService;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Completion Adapter ---
    // A missing credential does not stop the server; every generate request reports it.
    let generator: Option<Arc<dyn StoryGenerationService>> = match config.api_key() {
        Ok(api_key) => Some(build_generator(&config, api_key)),
        Err(e) => {
            warn!("{}; story generation will fail until it is configured", e);
            None
        }
    };
    info!(
        "Using {:?} provider with model {}",
        config.provider, config.story_model
    );

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), generator));

    // --- 4. Create the Web Router ---
    // Merge the relay router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(web::router(app_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_generator(config: &Config, api_key: &str) -> Arc<dyn StoryGenerationService> {
    match config.provider {
        CompletionProvider::Anthropic => Arc::new(AnthropicStoryAdapter::new(
            reqwest::Client::new(),
            api_key.to_string(),
            &config.anthropic_base_url,
            config.story_model.clone(),
        )),
        CompletionProvider::OpenAi => {
            let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(api_key));
            Arc::new(OpenAiStoryAdapter::new(
                openai_client,
                config.story_model.clone(),
            ))
        }
    }
}
