//! Update User Use Case
//!
//! Updates the caller's own profile. Empty or missing fields are left
//! unchanged, including the password. All changes land in a single write.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::identity::CurrentUser;

use crate::application::config::AuthConfig;
use crate::application::credential::CredentialService;
use crate::domain::entity::user::{ProfileChanges, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    avatar_path::AvatarPath, email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Update input
#[derive(Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar_path: Option<String>,
}

pub struct UpdateUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    credentials: CredentialService<R>,
}

impl<R> UpdateUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: CredentialService::new(repo.clone(), config),
            repo,
        }
    }

    pub async fn execute(
        &self,
        actor: &CurrentUser,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AuthResult<User> {
        if actor.user_id != user_id {
            return Err(AuthError::Forbidden);
        }

        let name = non_empty(input.name).map(UserName::new).transpose()?;
        let email = non_empty(input.email).map(Email::new).transpose()?;
        let avatar_path = AvatarPath::optional(input.avatar_path)?;
        let password = RawPassword::optional(input.password)?;

        let current = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(email) = &email {
            if *email != current.email && self.repo.exists_by_email(email).await? {
                return Err(AuthError::EmailTaken);
            }
        }

        // Hash before writing so a failure leaves the stored profile untouched
        let changes = ProfileChanges {
            name,
            email,
            avatar_path,
            password: password
                .as_ref()
                .map(|raw| self.credentials.hash_password(raw))
                .transpose()?,
        };

        if changes.is_empty() {
            return Ok(current);
        }

        let user = self
            .repo
            .update_profile(user_id, &changes)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(
            user_id = %user_id,
            password_changed = changes.password.is_some(),
            "User updated"
        );

        Ok(user)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
