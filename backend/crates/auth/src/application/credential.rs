//! Credential Service
//!
//! Password hashing, credential verification and session tokens.
//! Stateless: every call reads the repository and configuration it was
//! built with and keeps nothing between calls.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::identity::CurrentUser;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct CredentialService<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> CredentialService<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Salted one-way hash; two calls on the same input differ
    pub fn hash_password(&self, password: &RawPassword) -> AuthResult<UserPassword> {
        UserPassword::from_raw(password, self.config.pepper())
    }

    /// Look up an active user by email and check the password.
    ///
    /// Unknown email and wrong password both yield
    /// [`AuthError::InvalidCredentials`]. An unknown email still pays for one
    /// hash verification.
    pub async fn verify_credentials(
        &self,
        email: &Email,
        password: &RawPassword,
    ) -> AuthResult<User> {
        let pepper = self.config.pepper();

        match self.repo.find_credential_by_email(email).await? {
            Some((user, stored)) if stored.verify(password, pepper) => Ok(user),
            Some(_) => Err(AuthError::InvalidCredentials),
            None => {
                UserPassword::verify_dummy(password, pepper);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Signed token: `sub` = user id, `name`, `exp` = now + 72h
    pub fn issue_token(&self, user: &User) -> AuthResult<String> {
        self.issue_token_at(user, Utc::now())
    }

    pub fn issue_token_at(&self, user: &User, now: DateTime<Utc>) -> AuthResult<String> {
        self.config
            .token_codec()?
            .issue_at(user.user_id.get(), user.name.as_str(), now)
            .map_err(AuthError::Signing)
    }

    /// Check signature and expiry, and recover the request identity
    pub fn verify_token(&self, token: &str) -> AuthResult<CurrentUser> {
        self.verify_token_at(token, Utc::now())
    }

    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<CurrentUser> {
        let claims = self
            .config
            .token_codec()?
            .verify_at(token, now)
            .map_err(AuthError::TokenInvalid)?;
        let user_id = claims.user_id().map_err(AuthError::TokenInvalid)?;

        Ok(CurrentUser::new(UserId::new(user_id), claims.name))
    }

    /// Re-hash and store a new password; `None` leaves the stored hash as is.
    ///
    /// Returns whether the stored hash changed.
    pub async fn update_credentials(
        &self,
        user_id: UserId,
        new_password: Option<&RawPassword>,
    ) -> AuthResult<bool> {
        let Some(new_password) = new_password else {
            return Ok(false);
        };

        let hashed = self.hash_password(new_password)?;
        self.repo.update_password(user_id, &hashed).await?;

        tracing::info!(user_id = %user_id, "Password updated");

        Ok(true)
    }
}
