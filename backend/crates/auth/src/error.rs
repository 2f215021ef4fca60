//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found (or soft-deleted)
    #[error("User not found")]
    UserNotFound,

    /// Email already belongs to an active user
    #[error("Email is already registered")]
    EmailTaken,

    /// Unknown email or wrong password; the two are never told apart
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Acting on another user's account
    #[error("You cannot modify another user's account")]
    Forbidden,

    /// Request shape validation failed
    #[error("{0}")]
    Validation(String),

    /// No bearer token on a route that requires one
    #[error("Authentication required")]
    Unauthorized,

    /// Bearer token is malformed, forged or expired
    #[error("Session token is invalid or expired")]
    TokenInvalid(#[source] TokenError),

    /// Password hashing failed
    #[error("Password hashing failed")]
    Hashing(#[source] PasswordHashError),

    /// Token signing failed or no secret is configured
    #[error("Token signing failed")]
    Signing(#[source] TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::Unauthorized
            | AuthError::TokenInvalid(_) => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::Database(e) => classify_sqlx_error(e).0,
            AuthError::Hashing(_) | AuthError::Signing(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a fixed message so library error text
    /// (which may describe key or hash material) stays in the log.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            return AppError::new(kind, "Internal server error");
        }

        let err = match self {
            AuthError::Database(e) => AppError::new(kind, classify_sqlx_error(e).1),
            _ => AppError::new(kind, self.to_string()),
        };
        match self {
            AuthError::Unauthorized | AuthError::TokenInvalid(_) => {
                err.with_action("Sign in and send the token as a Bearer header")
            }
            AuthError::EmailTaken => err.with_action("Sign in or use a different email"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Signing(e) => {
                tracing::error!(error = %e, "Token signing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid(e) => {
                tracing::warn!(reason = %e, "Rejected session token");
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
