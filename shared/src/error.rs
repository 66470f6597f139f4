//! Error types for the shared crate
//!
//! Standardized error types that can be used across the entire framework.
//!
//! # Status mapping
//!
//! | Variant | HTTP status |
//! |---------|-------------|
//! | NotFound | 404 |
//! | Unauthorized / InvalidToken / TokenExpired | 401 |
//! | Validation / Conflict | 400 |
//! | Upstream | 502 |
//! | Database / Internal | 500 |
//!
//! Note: `Conflict` maps to 400, not 409. The public API reports a
//! duplicate review as a plain bad request.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Unified application error type
#[derive(Debug, Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    // ========== Business logic errors (4xx) ==========
    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate resource (400)
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    // ========== Collaborator errors (502) ==========
    /// Media collaborator rejected or failed an upload
    #[error("Upstream failure: {0}")]
    Upstream(String),

    // ========== System errors (500) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    // ========== Convenient constructors ==========

    /// Create an Unauthorized error
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    /// Create an InvalidToken error
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken(message.into())
    }

    /// Create a TokenExpired error
    pub fn token_expired() -> Self {
        Self::TokenExpired
    }

    /// Create a NotFound error (`resource` reads as "Product", "Review", ...)
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an Upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidToken(_) | Self::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to API clients
    ///
    /// 5xx detail stays server-side; clients get a generic message while the
    /// full error goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Unauthorized => "Not authorized".to_string(),
            Self::InvalidToken(_) => "Invalid token".to_string(),
            Self::TokenExpired => "Token expired".to_string(),
            Self::NotFound(resource) => format!("{resource} not found"),
            Self::Conflict(message) => message.clone(),
            Self::Validation(message) => message.clone(),
            Self::Upstream(_) => "Upstream service failure".to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Database(msg) => {
                tracing::error!(target: "database", error = %msg, "Database error occurred");
            }
            AppError::Internal(msg) => {
                tracing::error!(target: "internal", error = %msg, "Internal error occurred");
            }
            AppError::Upstream(msg) => {
                tracing::warn!(target: "upstream", error = %msg, "Upstream collaborator failure");
            }
            _ => {}
        }

        let body = Json(ApiResponse::<()>::error(self.public_message()));
        (status, body).into_response()
    }
}

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;
