//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! `Display` strings are what the client sees in `{"error": ...}` and stay
//! generic. Details (sqlx errors, signing failures, rejection reasons) are
//! only written to the server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::crypto::RandomnessError;
use platform::jwt::JwtError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user with the presented username or id
    #[error("Invalid username or password")]
    UserNotFound,

    /// No stored refresh or csrf token for the presented value
    #[error("Authentication required")]
    TokenNotFound,

    /// Password did not match the stored hash
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Missing, expired, revoked or mismatched token
    #[error("Authentication required")]
    Unauthenticated { reason: &'static str },

    /// Malformed client input
    #[error("{0}")]
    BadRequest(&'static str),

    /// Access token could not be signed
    #[error("Could not issue session")]
    Signing(#[source] JwtError),

    /// Entropy source unavailable while minting opaque tokens
    #[error("Could not issue session")]
    Randomness(#[from] RandomnessError),

    /// Database error
    #[error("Storage failure")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal server error")]
    Internal(String),
}

impl AuthError {
    pub fn unauthenticated(reason: &'static str) -> Self {
        AuthError::Unauthenticated { reason }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound
            | AuthError::TokenNotFound
            | AuthError::InvalidCredentials
            | AuthError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::Signing(_)
            | AuthError::Randomness(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound
            | AuthError::TokenNotFound
            | AuthError::InvalidCredentials
            | AuthError::Unauthenticated { .. } => ErrorKind::Unauthorized,
            AuthError::BadRequest(_) => ErrorKind::BadRequest,
            AuthError::Signing(_)
            | AuthError::Randomness(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether this is an authentication failure (401)
    pub fn is_auth_failure(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Signing(e) => {
                tracing::error!(error = %e, "Access token signing failed");
            }
            AuthError::Randomness(e) => {
                tracing::error!(error = %e, "Token generation failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials | AuthError::UserNotFound => {
                tracing::warn!(error = ?self, "Invalid login attempt");
            }
            AuthError::Unauthenticated { reason } => {
                tracing::debug!(reason, "Request not authenticated");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
