//! Request Identity
//!
//! [`CurrentUser`] は認証ミドルウェアがトークンを検証した後、
//! リクエスト拡張 (extensions) に格納するログインユーザーの情報です。
//! コンテンツ系のハンドラーは認証クレートに依存せず、この型だけを参照します。

use crate::id::UserId;

/// ログイン中のユーザー
///
/// ## Fields
/// * `user_id` - トークンの `sub` から復元したユーザー ID
/// * `name` - トークン発行時点の表示名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub name: String,
}

impl CurrentUser {
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

#[cfg(feature = "axum")]
mod extract {
    use std::convert::Infallible;

    use axum::extract::{FromRequestParts, OptionalFromRequestParts};
    use http::request::Parts;

    use super::CurrentUser;
    use crate::error::app_error::AppError;

    /// ログイン必須のハンドラー用
    impl<S> FromRequestParts<S> for CurrentUser
    where
        S: Send + Sync,
    {
        type Rejection = AppError;

        async fn from_request_parts(
            parts: &mut Parts,
            _state: &S,
        ) -> Result<Self, Self::Rejection> {
            parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
                AppError::unauthorized("Authentication required")
                    .with_action("Sign in and send the token as a Bearer header")
            })
        }
    }

    /// `Option<CurrentUser>` 用（匿名アクセス可のハンドラー）
    impl<S> OptionalFromRequestParts<S> for CurrentUser
    where
        S: Send + Sync,
    {
        type Rejection = Infallible;

        async fn from_request_parts(
            parts: &mut Parts,
            _state: &S,
        ) -> Result<Option<Self>, Self::Rejection> {
            Ok(parts.extensions.get::<CurrentUser>().cloned())
        }
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::extract::{FromRequestParts, OptionalFromRequestParts};
    use http::Request;

    #[tokio::test]
    async fn test_extracts_from_extensions() {
        let (mut parts, _) = Request::builder()
            .extension(CurrentUser::new(UserId::new(3), "alice"))
            .body(())
            .unwrap()
            .into_parts();

        let user = <CurrentUser as FromRequestParts<()>>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(user.user_id, UserId::new(3));
        assert_eq!(user.name, "alice");
    }

    #[tokio::test]
    async fn test_missing_identity() {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();

        let required =
            <CurrentUser as FromRequestParts<()>>::from_request_parts(&mut parts, &()).await;
        assert_eq!(required.unwrap_err().status_code(), 401);

        let optional =
            <CurrentUser as OptionalFromRequestParts<()>>::from_request_parts(&mut parts, &())
                .await
                .unwrap();
        assert!(optional.is_none());
    }
}
