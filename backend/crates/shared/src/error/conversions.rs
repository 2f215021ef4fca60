//! Error conversions - From implementations for infrastructure error types
//!
//! Provides automatic conversion from [`sqlx::Error`] to [`AppError`] and
//! renders [`AppError`] as an RFC 7807 problem document for axum.

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// PostgreSQL SQLSTATE for `unique_violation`
pub const PG_UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Whether a database error is a unique constraint violation.
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Classify a database error without consuming it.
///
/// Returns the error kind and a client-safe message.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx_error(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut => (
            ErrorKind::ServiceUnavailable,
            "Database connection pool exhausted",
        ),
        // https://www.postgresql.org/docs/current/errcodes-appendix.html
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // Class 23: Integrity Constraint Violation
            Some(PG_UNIQUE_VIOLATION) => (ErrorKind::Conflict, "Duplicate key value"),
            Some(PG_FOREIGN_KEY_VIOLATION) => (ErrorKind::Conflict, "Foreign key violation"),
            Some("23502") => (ErrorKind::BadRequest, "Required field is null"),
            Some("23514") => (ErrorKind::BadRequest, "Check constraint violation"),
            // Class 53: Insufficient Resources
            Some("53000" | "53100" | "53200" | "53300") => {
                (ErrorKind::ServiceUnavailable, "Database resource exhausted")
            }
            // Class 57: Operator Intervention
            Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                (ErrorKind::ServiceUnavailable, "Database unavailable")
            }
            _ => (ErrorKind::InternalServerError, "Database error"),
        },
        sqlx::Error::Io(_) => (ErrorKind::ServiceUnavailable, "Database connection error"),
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx_error(&err);
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}


#[cfg(all(test, feature = "axum"))]
mod axum_tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_problem_document() {
        let response = AppError::not_found("Post not found").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 404);
        assert_eq!(body["title"], "Not Found");
        assert_eq!(body["detail"], "Post not found");
    }
}
