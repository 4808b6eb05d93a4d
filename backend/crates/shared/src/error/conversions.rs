//! Error conversions
//!
//! `sqlx::Error` classification and the HTTP rendering of [`AppError`],
//! each behind its feature.

#[cfg(any(feature = "sqlx", feature = "axum"))]
use super::app_error::AppError;

/// Seconds a client should wait before retrying a 503
#[cfg(feature = "axum")]
pub const RETRY_AFTER_SECS: u32 = 5;

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    /// Connectivity problems are 503, everything else is 500.
    fn from(err: sqlx::Error) -> Self {
        let unavailable = match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
            // Class 08 (connection exception), 53 (insufficient resources),
            // 57P0x (operator intervention / shutdown)
            sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| {
                code.starts_with("08") || code.starts_with("53") || code.starts_with("57P0")
            }),
            _ => false,
        };

        if unavailable {
            AppError::unavailable("Storage unavailable").caused_by(err)
        } else {
            AppError::internal("Storage failure").caused_by(err)
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    /// `{"error": message}` with the mapped status; 503 adds `Retry-After`.
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::{StatusCode, header};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(serde_json::json!({ "error": self.message() }));

        if self.kind().is_retryable() {
            (
                status,
                [(header::RETRY_AFTER, RETRY_AFTER_SECS.to_string())],
                body,
            )
                .into_response()
        } else {
            (status, body).into_response()
        }
    }
}

#[cfg(all(test, feature = "sqlx"))]
mod sqlx_tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert_eq!(err.message(), "Storage failure");
    }
}
