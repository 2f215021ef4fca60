//! In-memory repository
//!
//! Same contract as [`super::postgres::PgUserRepository`], including the
//! partial unique index on active emails. Used by tests and local tooling.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use tokio::sync::Mutex;

use crate::domain::entity::user::{NewUser, ProfileChanges, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password: UserPassword,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    users: BTreeMap<UserId, StoredUser>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    state: Arc<Mutex<State>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl State {
    fn active(&self, user_id: UserId) -> Option<&StoredUser> {
        self.users
            .get(&user_id)
            .filter(|stored| stored.deleted_at.is_none())
    }

    fn active_mut(&mut self, user_id: UserId) -> Option<&mut StoredUser> {
        self.users
            .get_mut(&user_id)
            .filter(|stored| stored.deleted_at.is_none())
    }

    fn email_in_use(&self, email: &Email, except: Option<UserId>) -> bool {
        self.users.values().any(|stored| {
            stored.deleted_at.is_none()
                && stored.user.email == *email
                && Some(stored.user.user_id) != except
        })
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut state = self.state.lock().await;
        if state.email_in_use(&user.email, None) {
            return Err(AuthError::EmailTaken);
        }

        state.next_id += 1;
        let now = Utc::now();
        let created = User {
            user_id: UserId::new(state.next_id),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar_path: user
                .avatar_path
                .as_ref()
                .map(|path| path.as_str().to_string()),
            created_at: now,
            updated_at: now,
        };

        state.users.insert(
            created.user_id,
            StoredUser {
                user: created.clone(),
                password: user.password.clone(),
                deleted_at: None,
            },
        );

        Ok(created)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.active(user_id).map(|stored| stored.user.clone()))
    }

    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> AuthResult<Option<(User, UserPassword)>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|stored| stored.deleted_at.is_none() && stored.user.email == *email)
            .map(|stored| (stored.user.clone(), stored.password.clone())))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let state = self.state.lock().await;
        Ok(state.email_in_use(email, None))
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<User>> {
        let mut state = self.state.lock().await;
        if let Some(email) = &changes.email {
            if state.email_in_use(email, Some(user_id)) {
                return Err(AuthError::EmailTaken);
            }
        }

        Ok(state.active_mut(user_id).map(|stored| {
            changes.apply_to(&mut stored.user, Utc::now());
            if let Some(password) = &changes.password {
                stored.password = password.clone();
            }
            stored.user.clone()
        }))
    }

    async fn update_password(&self, user_id: UserId, password: &UserPassword) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        if let Some(stored) = state.active_mut(user_id) {
            stored.password = password.clone();
            stored.user.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn soft_delete(&self, user_id: UserId) -> AuthResult<bool> {
        let mut state = self.state.lock().await;
        Ok(match state.active_mut(user_id) {
            Some(stored) => {
                stored.deleted_at = Some(Utc::now());
                true
            }
            None => false,
        })
    }
}
