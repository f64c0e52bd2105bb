//! # HTTP API Errors
//!
//! Error types for the record API and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::mutation::MutationError;
use crate::query::QueryError;
use crate::records::UnknownKind;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Record API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed JSON body or query parameter
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Path names no record kind
    #[error("{0}")]
    UnknownKind(#[from] UnknownKind),

    /// Route exists for another record kind only
    #[error("Not found: {0}")]
    NotFound(String),

    // ==================
    // Delegated (status per variant)
    // ==================
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownKind(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Query(QueryError::Compile(_)) => StatusCode::BAD_REQUEST,
            ApiError::Query(QueryError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Mutation(MutationError::EmptyBatch | MutationError::Registry(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Mutation(MutationError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "CEREAL_INVALID_REQUEST",
            ApiError::UnknownKind(_) => "CEREAL_UNKNOWN_KIND",
            ApiError::NotFound(_) => "CEREAL_NOT_FOUND",
            ApiError::Query(err) => err.code(),
            ApiError::Mutation(err) => err.code(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code(),
            status: err.status_code().as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(target: "cereal::http", code = self.code(), error = %self, "Request failed");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
