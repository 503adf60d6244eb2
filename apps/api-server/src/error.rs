//! Error types for the API server.
//!
//! Every per-request failure is rendered as the response envelope with the
//! matching status:
//!
//! ```text
//! ApiError::Validation  ──► 400  { "success": false, "error": "Invalid id" }
//! ApiError::NotFound    ──► 404  { "success": false, "error": "Product not found" }
//! ApiError::Store       ──► 500  { "success": false, "error": "<store message>" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::error;

use warehouse_core::{CoreError, Envelope, ValidationError};
use warehouse_db::DbError;

/// API error type with automatic HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed id, empty update or unparseable body (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No row matched (404).
    #[error("{0}")]
    NotFound(String),

    /// Store failure (500, logged). The store's message is returned verbatim.
    #[error("{source}")]
    Store {
        endpoint: &'static str,
        resource: String,
        source: DbError,
    },
}

impl ApiError {
    /// Wraps a store failure and logs it with the endpoint that hit it.
    pub fn store(endpoint: &'static str, resource: impl Into<String>, source: DbError) -> Self {
        let resource = resource.into();
        error!(endpoint, resource = %resource, error = %source, "Store operation failed");

        ApiError::Store {
            endpoint,
            resource,
            source,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            CoreError::Validation(v) => ApiError::Validation(v),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Envelope::<Value>::failure(self.to_string());

        (status, Json(body)).into_response()
    }
}
