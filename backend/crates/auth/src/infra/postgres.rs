//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, ProfileChanges, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    avatar_path::AvatarPath, email::Email, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Unique violations on `users_email_active_key` mean the email is taken
fn map_email_conflict(e: sqlx::Error) -> AuthError {
    if is_unique_violation(&e) {
        AuthError::EmailTaken
    } else {
        AuthError::Database(e)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash, avatar_path)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, avatar_path, created_at, updated_at
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.avatar_path.as_ref().map(AvatarPath::as_str))
        .fetch_one(&self.pool)
        .await
        .map_err(map_email_conflict)?;

        Ok(row.into_user())
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, avatar_path, created_at, updated_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> AuthResult<Option<(User, UserPassword)>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, name, email, avatar_path, created_at, updated_at, password_hash
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRow::into_credential).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: &ProfileChanges,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                avatar_path = COALESCE($4, avatar_path),
                password_hash = COALESCE($5, password_hash),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, name, email, avatar_path, created_at, updated_at
            "#,
        )
        .bind(user_id.get())
        .bind(changes.name.as_ref().map(UserName::as_str))
        .bind(changes.email.as_ref().map(Email::as_str))
        .bind(changes.avatar_path.as_ref().map(AvatarPath::as_str))
        .bind(changes.password.as_ref().map(UserPassword::as_phc_string))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_email_conflict)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn update_password(&self, user_id: UserId, password: &UserPassword) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.get())
        .bind(password.as_phc_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn soft_delete(&self, user_id: UserId) -> AuthResult<bool> {
        let affected = sqlx::query(
            "UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id.get())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    avatar_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::new(self.id),
            name: UserName::from_db(self.name),
            email: Email::from_db(self.email),
            avatar_path: self.avatar_path,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

impl CredentialRow {
    fn into_credential(self) -> AuthResult<(User, UserPassword)> {
        let password = UserPassword::from_phc_string(self.password_hash)?;
        Ok((self.user.into_user(), password))
    }
}
