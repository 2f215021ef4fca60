//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and the credential service
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, identity middleware
//!
//! ## Features
//! - User registration and email + password login
//! - Profile read / update / soft delete (own account only)
//! - Stateless HS256 bearer tokens valid for 72 hours
//!
//! ## Security Model
//! - Passwords normalized (NFKC) and hashed with Argon2id, optional pepper
//! - Unknown email and wrong password are indistinguishable to callers
//! - Tokens carry the user id and display name; nothing is stored server side

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::credential::CredentialService;
pub use error::{AuthError, AuthResult};
pub use infra::memory::MemoryUserRepository;
pub use infra::postgres::PgUserRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::identify_viewer;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
