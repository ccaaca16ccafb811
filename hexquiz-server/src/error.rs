//! Error types for hexquiz-server
//!
//! Every failure becomes an ordinary structured JSON response:
//! `{"error": {"code": "...", "message": "..."}}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hexquiz_common::Error;
use serde_json::json;
use thiserror::Error;

use crate::services::PickError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Core error (not found, upstream, validation, storage)
    #[error(transparent)]
    Core(#[from] Error),

    /// Quiz question could not be produced
    #[error(transparent)]
    Quiz(#[from] PickError),

    /// Request body missing, not JSON, or not the expected shape
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
}

/// HTTP status for a core error
pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::ExternalService(_) => StatusCode::BAD_GATEWAY,
        Error::Storage(_) | Error::Io(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match &self {
            ApiError::Core(err) => (
                status_for(err),
                json!({ "error": { "code": err.code(), "message": message } }),
            ),
            ApiError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": { "code": "VALIDATION_ERROR", "message": message } }),
            ),
            ApiError::Quiz(PickError::NoCandidates) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": { "code": "VALIDATION_ERROR", "message": message } }),
            ),
            ApiError::Quiz(PickError::Taxon { taxon, cause }) => (
                status_for(cause),
                json!({ "error": { "code": cause.code(), "message": message, "taxon": taxon } }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
