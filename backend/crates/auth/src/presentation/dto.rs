//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_path: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token + profile, returned by register and login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// Users
// ============================================================================

/// Update request; omitted or empty fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar_path: Option<String>,
}

/// Public profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    /// Only present on the caller's own profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub avatar_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn public(user: User) -> Self {
        Self {
            id: user.user_id,
            name: user.name.into_inner(),
            email: None,
            avatar_path: user.avatar_path,
            created_at: user.created_at,
        }
    }

    pub fn own(user: User) -> Self {
        let email = user.email.as_str().to_string();
        Self {
            email: Some(email),
            ..Self::public(user)
        }
    }
}
