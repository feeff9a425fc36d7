pub mod protocol;
pub mod rest;
pub mod state;

pub use rest::{
    generate_handler, list_motifs_handler, method_not_allowed_handler, preflight_handler,
};

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
        HeaderValue,
    },
    routing::{get, post, MethodRouter},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

/// The path the relay was served from by its original host; kept as an alias.
pub const LEGACY_GENERATE_PATH: &str = "/.netlify/functions/generate-story";

const MAX_BODY_BYTES: usize = 64 * 1024;

fn generate_routes() -> MethodRouter<Arc<AppState>> {
    post(generate_handler)
        .options(preflight_handler)
        .fallback(method_not_allowed_handler)
}

/// Builds the relay router. Every response carries the same CORS and content-type
/// headers, whatever its status.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate", generate_routes())
        .route(LEGACY_GENERATE_PATH, generate_routes())
        .route("/motifs", get(list_motifs_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .with_state(app_state)
}
