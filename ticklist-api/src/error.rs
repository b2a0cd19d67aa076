/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts automatically
/// to the right status code. Every error body is `{"message": "..."}`;
/// internal detail (database errors, hashing failures) is logged
/// server-side and never echoed to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use ticklist_shared::auth::{jwt::JwtError, middleware::AuthError, password::PasswordError};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400), used for missing or malformed fields
    #[error("{0}")]
    Validation(String),

    /// Email is already taken (400)
    #[error("email already registered")]
    DuplicateEmail,

    /// Login failed (401). One message for both unknown email and wrong
    /// password so responses do not reveal which accounts exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authentication failure surfaced by the middleware layer (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Resource missing, or owned by somebody else (404)
    #[error("{0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log internal errors but don't expose details to clients
        if let ApiError::Internal(ref detail) = self {
            tracing::error!("Internal error: {}", detail);
        }

        let status = self.status_code();
        let body = Json(json!({ "message": self.to_string() }));

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            // Unique constraint on the email column means a duplicate signup
            if let Some(constraint) = db_err.constraint() {
                if constraint.contains("email") {
                    return ApiError::DuplicateEmail;
                }
            }
        }

        ApiError::Internal(format!("Database error: {}", err))
    }
}

/// Convert auth middleware errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(e) => ApiError::Internal(format!("Database error: {}", e)),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert JWT errors to API errors
impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::Internal(format!("Token operation failed: {}", err))
    }
}
