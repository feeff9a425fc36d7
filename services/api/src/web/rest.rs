//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the relay endpoints and the master
//! definition for the OpenAPI specification.

use crate::{
    error::RelayError,
    web::{
        protocol::{ErrorResponse, GenerateRequestBody, MotifCatalogResponse, StoryResponse},
        state::AppState,
    },
};
use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;
use nosleep_core::{GenerationPrompt, MOTIF_CATEGORIES};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_handler,
        preflight_handler,
        list_motifs_handler,
    ),
    components(
        schemas(GenerateRequestBody, StoryResponse, ErrorResponse, MotifCatalogResponse)
    ),
    tags(
        (name = "NoSleep Story Relay", description = "Relays story requests to the completion provider.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate a story for a motif and reading length.
///
/// Makes exactly one call to the completion provider. There is no retry.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequestBody,
    responses(
        (status = 200, description = "Story generated", body = StoryResponse),
        (status = 400, description = "Invalid JSON or missing parameters", body = ErrorResponse),
        (status = 500, description = "Missing credential or provider failure", body = ErrorResponse)
    )
)]
pub async fn generate_handler(
    State(app_state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let span = info_span!("generate", request_id = %Uuid::new_v4());

    async move {
        match generate_story(&app_state, body).await {
            Ok(story) => {
                info!("Story generated ({} chars)", story.len());
                (StatusCode::OK, Json(StoryResponse { story })).into_response()
            }
            Err(e) => {
                if e.status().is_server_error() {
                    error!("Story generation error: {:?}", e);
                } else {
                    warn!("Rejected generate request: {}", e);
                }
                e.into_response_with_details(app_state.config.is_development())
            }
        }
    }
    .instrument(span)
    .await
}

/// Runs the generate path in order; the first failure ends the request.
async fn generate_story(
    app_state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<String, RelayError> {
    let generator = app_state.generator()?;

    let (motif, read_length) = GenerateRequestBody::from_bytes(&body?)?.into_parameters()?;
    let prompt = GenerationPrompt::build(&motif, read_length);
    info!(
        motif = %motif,
        read_length = read_length.as_str(),
        band = %prompt.word_count_band,
        "Requesting story from completion provider"
    );

    Ok(generator.generate_story(&prompt).await?)
}

/// Browser preflight. Always 204 with an empty body.
#[utoipa::path(
    options,
    path = "/generate",
    responses(
        (status = 204, description = "Preflight accepted")
    )
)]
pub async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Any method other than POST or OPTIONS on the generate routes.
pub async fn method_not_allowed_handler() -> RelayError {
    let err = RelayError::MethodNotAllowed;
    warn!("Rejected generate request: {}", err);
    err
}

/// List the motif taxonomy offered to users.
#[utoipa::path(
    get,
    path = "/motifs",
    responses(
        (status = 200, description = "Motif categories, Random first", body = MotifCatalogResponse)
    )
)]
pub async fn list_motifs_handler() -> Json<MotifCatalogResponse> {
    Json(MotifCatalogResponse {
        categories: MOTIF_CATEGORIES,
    })
}
