//! User Name Value Object
//!
//! ユーザー名は投稿・コメントの著者として表示される**表示名**。
//! ログインには使用しない（ログイン識別子はメールアドレス）。
//!
//! ## 設計方針
//! - NFKC正規化 → 前後の空白除去 → 検証 の順で処理
//! - 一意性は要求しない
//!
//! ## 不変条件
//! - 長さ: 1〜50文字（正規化後、Unicode コードポイント数）
//! - 制御文字を含まない

use derive_more::Display;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

/// 検証済みの表示名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(AuthError::Validation("Name is required".to_string()));
        }

        if trimmed.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Name must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Name contains invalid control characters".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// DB から読み込んだ値（検証済みとみなす）
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
