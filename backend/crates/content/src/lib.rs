//! Content Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, embed URL normalization, repository traits
//! - `application/` - Query engine and write use cases
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Post listing with keyword search (title, speaker or detail) and author filter
//! - Per-viewer favorite flag plus comment and favorite counts on every post
//! - Comments and favorites, each with their own paginated listing
//! - YouTube watch and short links turned into embeddable player URLs
//!
//! ## Consistency Model
//! - Soft-deleted posts, comments and users never appear in any read
//! - A listing's total count and its page are cut from the same filter
//! - Favorites are unique per (user, post), enforced by the storage layer

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ContentConfig;
pub use application::query::ContentQueryEngine;
pub use domain::services::embed_url;
pub use error::{ContentError, ContentResult};
pub use infra::memory::MemoryContentRepository;
pub use infra::postgres::PgContentRepository;
pub use presentation::handlers::ContentAppState;
pub use presentation::router::{content_router, content_router_generic};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
