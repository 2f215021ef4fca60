//! Content Error Types
//!
//! Content-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Content-specific result type alias
pub type ContentResult<T> = Result<T, ContentError>;

/// Content-specific error variants
#[derive(Debug, Error)]
pub enum ContentError {
    /// Post does not exist, is soft-deleted, or its author is
    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// No favorite for this (user, post) pair
    #[error("Favorite not found")]
    FavoriteNotFound,

    /// Second favorite for the same (user, post) pair
    #[error("Post is already in favorites")]
    AlreadyFavorited,

    /// Acting on someone else's post or comment
    #[error("You can only modify your own content")]
    Forbidden,

    /// Request shape validation failed
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::PostNotFound
            | ContentError::CommentNotFound
            | ContentError::FavoriteNotFound => ErrorKind::NotFound,
            ContentError::AlreadyFavorited => ErrorKind::Conflict,
            ContentError::Forbidden => ErrorKind::Forbidden,
            ContentError::Validation(_) => ErrorKind::UnprocessableEntity,
            ContentError::Database(e) => classify_sqlx_error(e).0,
            ContentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            return AppError::new(kind, "Internal server error");
        }

        match self {
            ContentError::Database(e) => AppError::new(kind, classify_sqlx_error(e).1),
            _ => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ContentError::Database(e) => {
                tracing::error!(error = %e, "Content database error");
            }
            ContentError::Internal(msg) => {
                tracing::error!(message = %msg, "Content internal error");
            }
            ContentError::Forbidden => {
                tracing::warn!("Attempt to modify another user's content");
            }
            _ => {
                tracing::debug!(error = %self, "Content error");
            }
        }
    }
}

impl From<ContentError> for AppError {
    fn from(err: ContentError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
