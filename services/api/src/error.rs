//! services/api/src/error.rs
//!
//! Defines the error types for the relay service: `ApiError` for startup and
//! `RelayError` for a single generate request.

use crate::config::ConfigError;
use crate::web::protocol::ErrorResponse;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use nosleep_core::ports::PortError;

/// The primary error type for starting the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Every way a single relay request can fail.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid JSON in request body")]
    InvalidJson,

    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The body could not be read (e.g. it exceeds the size limit).
    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),

    /// The provider credential is not configured.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The completion call failed (auth, quota, network...).
    #[error("{}", .0.message())]
    UpstreamGeneration(#[from] PortError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidJson | RelayError::MissingParameters => StatusCode::BAD_REQUEST,
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Body(rejection) => rejection.status(),
            RelayError::Configuration(_) | RelayError::UpstreamGeneration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Renders the JSON error body. `details` is only ever attached to 500s, and
    /// only when `include_details` is set.
    pub fn into_response_with_details(self, include_details: bool) -> Response {
        let status = self.status();
        let details = (include_details && status == StatusCode::INTERNAL_SERVER_ERROR)
            .then(|| serde_json::Value::String(format!("{:?}", self)));
        let body = ErrorResponse {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        self.into_response_with_details(false)
    }
}
