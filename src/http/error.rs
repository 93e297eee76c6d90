//! HTTP error handling and response types.
//!
//! Handlers return [`crate::error::EngineError`] directly; this module maps
//! it onto HTTP status codes and the `{"success": false, "error": {...}}`
//! envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error body inside the envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured hints (e.g. the known airport codes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ApiError,
}

fn status_for(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        EngineError::NotFound { .. } => StatusCode::NOT_FOUND,
        EngineError::DataSource { .. } => StatusCode::BAD_GATEWAY,
        EngineError::ComputationTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        EngineError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let details = match &self {
            EngineError::NotFound { details, .. } => details.clone(),
            _ => None,
        };
        let envelope = ErrorEnvelope {
            success: false,
            error: ApiError {
                code: self.code().to_string(),
                message: self.to_string(),
                details,
            },
        };
        (status, Json(envelope)).into_response()
    }
}
