//! Avatar Path Value Object
//!
//! アップロード済みアバター画像の相対パス。画像ファイル自体の保存は
//! このクレートの範囲外で、ここではパス文字列だけを扱う。
//!
//! ## 不変条件
//! - 前後の空白を除去した後、1〜100文字
//! - 制御文字を含まない

use derive_more::Display;

use crate::error::{AuthError, AuthResult};

/// Maximum length for avatar path (in characters)
pub const AVATAR_PATH_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct AvatarPath(String);

impl AvatarPath {
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AuthError::Validation("Avatar path is empty".to_string()));
        }

        if trimmed.chars().count() > AVATAR_PATH_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Avatar path must be at most {} characters",
                AVATAR_PATH_MAX_LENGTH
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AuthError::Validation(
                "Avatar path contains invalid control characters".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// 空文字列・未指定は「指定なし」
    pub fn optional(raw: Option<String>) -> AuthResult<Option<Self>> {
        raw.filter(|value| !value.trim().is_empty())
            .map(Self::new)
            .transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_path() {
        let path = AvatarPath::new(" images/users/1.png ").unwrap();
        assert_eq!(path.as_str(), "images/users/1.png");
    }

    #[test]
    fn test_optional() {
        assert!(AvatarPath::optional(None).unwrap().is_none());
        assert!(AvatarPath::optional(Some("  ".to_string())).unwrap().is_none());
        assert!(AvatarPath::optional(Some("a.png".to_string())).unwrap().is_some());
    }

    #[test]
    fn test_length_limit() {
        assert!(AvatarPath::new("a".repeat(AVATAR_PATH_MAX_LENGTH)).is_ok());
        assert!(matches!(
            AvatarPath::new("a".repeat(AVATAR_PATH_MAX_LENGTH + 1)),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn test_control_characters() {
        assert!(AvatarPath::new("bad\npath.png").is_err());
    }
}
