//! Register Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credential::CredentialService;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    avatar_path::AvatarPath, email::Email, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Register input
#[derive(Default)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Optional path of an already stored avatar image
    pub avatar_path: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    credentials: CredentialService<R>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            credentials: CredentialService::new(repo.clone(), config),
            repo,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let name = UserName::new(&input.name)?;
        let email = Email::new(input.email)?;
        let password = RawPassword::new(input.password)?;
        let avatar_path = AvatarPath::optional(input.avatar_path)?;

        // Fast path; the unique index still decides under concurrency
        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = self.credentials.hash_password(&password)?;

        let user = self
            .repo
            .create(&NewUser {
                name,
                email,
                password,
                avatar_path,
            })
            .await?;

        let token = self.credentials.issue_token(&user)?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(RegisterOutput { user, token })
    }
}
