//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer. Every read ignores soft-deleted users.

use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, ProfileChanges, User};
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user; a duplicate active email yields `AuthError::EmailTaken`
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find an active user by id
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find an active user together with the stored password hash
    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> AuthResult<Option<(User, UserPassword)>>;

    /// Check whether an active user already uses this email
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Apply profile and password changes in one write; `None` if the user is gone
    async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<User>>;

    /// Replace the stored password hash
    async fn update_password(&self, user_id: UserId, password: &UserPassword) -> AuthResult<()>;

    /// Soft-delete; returns `false` if the user was already gone
    async fn soft_delete(&self, user_id: UserId) -> AuthResult<bool>;
}
