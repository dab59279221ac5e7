//! Error types for the page sharing server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

// == App Error Enum ==
/// Unified error type for the page sharing server.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or missing input (empty content, oversized payload, ...)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Unknown page id
    #[error("Not found: {0}")]
    NotFound(String),

    /// A protected page was requested without a secret
    #[error("Secret required")]
    SecretRequired,

    /// Failed authoring gate or wrong page secret.
    /// The inner detail is logged, never sent to the caller.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Storage backend unreachable or query failure
    #[error("Storage error: {0}")]
    Storage(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::SecretRequired => (
                StatusCode::UNAUTHORIZED,
                "secret_required",
                "This page is protected, a secret is required".to_string(),
            ),
            // Generic body: the caller must not learn whether the session was
            // missing, the credential was wrong, or the secret mismatched.
            AppError::Unauthorized(reason) => {
                debug!("unauthorized request: {}", reason);
                (
                    StatusCode::UNAUTHORIZED,
                    "unauthorized",
                    "Unauthorized".to_string(),
                )
            }
            AppError::Storage(detail) => {
                error!("storage error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "code": code,
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Storage Error Conversions ==
impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the page sharing server.
pub type Result<T> = std::result::Result<T, AppError>;
