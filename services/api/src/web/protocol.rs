//! services/api/src/web/protocol.rs
//!
//! Defines the JSON bodies exchanged between the browser client and the relay.

use crate::error::RelayError;
use nosleep_core::{MotifCategory, ReadLength};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Relay
//=========================================================================================

/// The generate request body.
///
/// Fields are kept as raw JSON so that presence can be judged the way a browser
/// client expects: `null`, `false`, `0` and `""` all count as missing.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestBody {
    #[serde(default)]
    #[schema(value_type = String, example = "Skinwalkers")]
    pub motif: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String, example = "short")]
    pub read_length: Option<Value>,
}

impl GenerateRequestBody {
    /// Parses a raw request body. An empty body reads as `{}`.
    pub fn from_bytes(body: &[u8]) -> Result<Self, RelayError> {
        if body.is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_json::from_slice(body).map_err(|_| RelayError::InvalidJson)?;
        // Valid JSON that is not an object carries no parameters.
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Returns the motif text and the read length, or `MissingParameters`.
    pub fn into_parameters(self) -> Result<(String, ReadLength), RelayError> {
        let (Some(motif), Some(read_length)) = (
            self.motif.filter(is_truthy),
            self.read_length.filter(is_truthy),
        ) else {
            return Err(RelayError::MissingParameters);
        };

        let motif = match motif {
            Value::String(text) => text,
            other => other.to_string(),
        };
        let read_length = match read_length {
            Value::String(text) => ReadLength::from_wire(&text),
            _ => ReadLength::Long,
        };
        Ok((motif, read_length))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

//=========================================================================================
// Messages Sent FROM the Relay TO the Client (Browser)
//=========================================================================================

/// A generated story.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoryResponse {
    pub story: String,
}

/// Any failure. `details` is only present in development deployments.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

/// The motif taxonomy, "Random" first.
#[derive(Debug, Serialize, ToSchema)]
pub struct MotifCatalogResponse {
    #[schema(value_type = Vec<Object>)]
    pub categories: &'static [MotifCategory],
}
