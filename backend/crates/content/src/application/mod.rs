//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Reads go through [`ContentQueryEngine`]; each write is its own use case.

pub mod add_favorite;
pub mod config;
pub mod create_comment;
pub mod create_post;
pub mod delete_comment;
pub mod delete_post;
pub mod query;
pub mod remove_favorite;
pub mod update_post;

// Re-exports
pub use add_favorite::AddFavoriteUseCase;
pub use config::ContentConfig;
pub use create_comment::CreateCommentUseCase;
pub use create_post::CreatePostUseCase;
pub use delete_comment::DeleteCommentUseCase;
pub use delete_post::DeletePostUseCase;
pub use query::ContentQueryEngine;
pub use remove_favorite::RemoveFavoriteUseCase;
pub use update_post::UpdatePostUseCase;
