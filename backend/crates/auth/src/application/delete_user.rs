//! Delete User Use Case
//!
//! Soft-deletes the caller's own account. Posts and comments stay in the
//! database but disappear from every listing together with their author.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::identity::CurrentUser;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct DeleteUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, actor: &CurrentUser, user_id: UserId) -> AuthResult<()> {
        if actor.user_id != user_id {
            return Err(AuthError::Forbidden);
        }

        if !self.repo.soft_delete(user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}
