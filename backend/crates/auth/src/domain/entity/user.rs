//! User Entity
//!
//! Public user profile. The password hash is deliberately not a field:
//! it only travels together with a `User` inside the credential lookup
//! of [`crate::domain::repository::UserRepository`].

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    avatar_path::AvatarPath, email::Email, user_name::UserName, user_password::UserPassword,
};

/// User entity (active, i.e. not soft-deleted)
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Display name
    pub name: UserName,
    /// Login identifier (unique among active users)
    pub email: Email,
    /// Relative path of the uploaded avatar image
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting a user; the repository assigns the id
#[derive(Debug)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password: UserPassword,
    pub avatar_path: Option<AvatarPath>,
}

/// Profile fields to change; `None` keeps the current value.
///
/// A new password arrives already hashed so the whole change is one write.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<UserName>,
    pub email: Option<Email>,
    pub avatar_path: Option<AvatarPath>,
    pub password: Option<UserPassword>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.avatar_path.is_none()
            && self.password.is_none()
    }

    /// Apply the profile fields to an in-memory copy
    pub fn apply_to(&self, user: &mut User, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(avatar_path) = &self.avatar_path {
            user.avatar_path = Some(avatar_path.as_str().to_string());
        }
        user.updated_at = now;
    }
}
