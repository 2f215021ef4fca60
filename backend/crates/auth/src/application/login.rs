//! Login Use Case
//!
//! Verifies email + password and issues a session token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credential::CredentialService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::AuthResult;

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    credentials: CredentialService<R>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: CredentialService::new(repo, config),
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Shape checks only; they say nothing about which accounts exist
        let email = Email::new(input.email)?;
        let password = RawPassword::new(input.password)?;

        let user = self.credentials.verify_credentials(&email, &password).await?;
        let token = self.credentials.issue_token(&user)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { user, token })
    }
}
