//! Error types for songlib-api
//!
//! Each variant maps to one HTTP status. Messages are short and meant for the
//! client; underlying causes are logged where the failure is detected and
//! never copied into the response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Error body: `{"error": "<message>"}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing request data (400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No song with the requested id (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// A song with the same group and title already exists (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The external song details API failed (502)
    #[error("Dependency failure: {0}")]
    DependencyFailure(String),

    /// Storage error, date parse error or anything unexpected (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::DependencyFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn song_not_found() -> Self {
        ApiError::NotFound("Song not found".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::InvalidInput(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::DependencyFailure(msg)
            | ApiError::Internal(msg) => msg,
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type for API handlers and services
pub type ApiResult<T> = Result<T, ApiError>;
