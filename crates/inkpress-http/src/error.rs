//! HTTP error types and response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use inkpress_core::validate::FieldErrors;
use inkpress_store::StoreError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors a request can terminate with. Every kind maps to exactly one
/// status code; there is no per-handler variation.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Resource already exists: {message}")]
    Conflict { message: String },

    #[error("Not logged in")]
    Unauthorized,

    #[error("Access forbidden: {message}")]
    Forbidden { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict<T: Into<String>>(message: T) -> Self {
        ApiError::Conflict {
            message: message.into(),
        }
    }

    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        ApiError::Forbidden {
            message: message.into(),
        }
    }

    pub fn internal<T: Into<String>>(message: T) -> Self {
        ApiError::Internal {
            message: message.into(),
        }
    }

    /// Stable code for API clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_FAILED",
            ApiError::NotFound { .. } => "RESOURCE_NOT_FOUND",
            ApiError::Conflict { .. } => "RESOURCE_CONFLICT",
            ApiError::Unauthorized => "NOT_LOGGED_IN",
            ApiError::Forbidden { .. } => "ACCESS_FORBIDDEN",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(resource) => ApiError::not_found(resource),
            StoreError::Conflict(resource) => ApiError::conflict(format!("{resource} already exists")),
            StoreError::Hash(e) => ApiError::internal(format!("hashing failed: {e}")),
            StoreError::Migration(e) => ApiError::internal(format!("migration failed: {e}")),
            StoreError::Database(e) => ApiError::internal(format!("database error: {e}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        let body = match &self {
            ApiError::Validation(errors) => serde_json::json!({
                "error": {
                    "code": self.error_code(),
                    "message": "Validation failed",
                    "fields": errors.errors,
                }
            }),
            _ => serde_json::json!({
                "error": {
                    "code": self.error_code(),
                    "message": self.to_string(),
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}
