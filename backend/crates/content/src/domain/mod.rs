//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Post, Comment, Favorite) and read projections
//! - Domain value objects (Pagination, Keyword, PostContent)
//! - Domain services (embed URL normalization)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
