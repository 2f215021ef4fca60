//! Unit tests for Auth crate

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::application::{RegisterInput, RegisterOutput, RegisterUseCase};
    use crate::infra::memory::MemoryUserRepository;

    pub fn setup() -> (Arc<MemoryUserRepository>, Arc<AuthConfig>) {
        (
            Arc::new(MemoryUserRepository::new()),
            Arc::new(AuthConfig::development()),
        )
    }

    pub async fn register(
        repo: &Arc<MemoryUserRepository>,
        config: &Arc<AuthConfig>,
        name: &str,
        email: &str,
        password: &str,
    ) -> RegisterOutput {
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(RegisterInput {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                avatar_path: None,
            })
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert!(config.token_secret.is_none());
        assert!(config.password_pepper.is_none());
        assert_eq!(config.token_ttl.as_secs(), 72 * 3600);
    }

    #[test]
    fn test_default_config_cannot_sign() {
        let config = AuthConfig::default();
        assert!(config.token_codec().is_err());
    }

    #[test]
    fn test_with_random_secret() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.token_secret.as_ref().map(Vec::len), Some(32));
        assert_ne!(a.token_secret, b.token_secret);
        assert!(a.token_codec().is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::development()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("112, 101"));
    }
}

#[cfg(test)]
mod credential_tests {
    use chrono::{Duration, Utc};

    use super::support::{register, setup};
    use crate::application::CredentialService;
    use crate::domain::value_object::{email::Email, user_password::RawPassword};
    use crate::error::AuthError;

    fn raw(password: &str) -> RawPassword {
        RawPassword::new(password.to_string()).unwrap()
    }

    #[test]
    fn test_hash_password_is_salted() {
        let (repo, config) = setup();
        let service = CredentialService::new(repo, config);
        let password = raw("correct horse");

        let a = service.hash_password(&password).unwrap();
        let b = service.hash_password(&password).unwrap();

        assert_ne!(a.as_phc_string(), b.as_phc_string());
        assert!(a.as_phc_string().starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let (repo, config) = setup();
        let registered = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        let service = CredentialService::new(repo, config);

        let user = service
            .verify_credentials(&Email::new("Alice@Example.com").unwrap(), &raw("s3cret!"))
            .await
            .unwrap();

        assert_eq!(user.user_id, registered.user.user_id);
    }

    #[tokio::test]
    async fn test_verify_credentials_failures_are_indistinguishable() {
        let (repo, config) = setup();
        register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        let service = CredentialService::new(repo, config);

        let wrong_password = service
            .verify_credentials(&Email::new("alice@example.com").unwrap(), &raw("wrong"))
            .await
            .unwrap_err();
        let unknown_email = service
            .verify_credentials(&Email::new("nobody@example.com").unwrap(), &raw("s3cret!"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.status_code(), unknown_email.status_code());
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let (repo, config) = setup();
        let registered = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        let service = CredentialService::new(repo, config);

        let current = service.verify_token(&registered.token).unwrap();

        assert_eq!(current.user_id, registered.user.user_id);
        assert_eq!(current.name, "alice");
    }

    #[tokio::test]
    async fn test_token_expires_after_72_hours() {
        let (repo, config) = setup();
        let registered = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        let service = CredentialService::new(repo, config);

        let issued_at = Utc::now();
        let token = service.issue_token_at(&registered.user, issued_at).unwrap();

        assert!(
            service
                .verify_token_at(&token, issued_at + Duration::hours(71))
                .is_ok()
        );
        assert!(matches!(
            service.verify_token_at(&token, issued_at + Duration::hours(73)),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let (repo, config) = setup();
        let registered = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;

        let (other_repo, other_config) = setup();
        let other = CredentialService::new(other_repo, other_config);

        assert!(matches!(
            other.verify_token(&registered.token),
            Err(AuthError::TokenInvalid(_))
        ));
        assert!(matches!(
            other.verify_token("not-a-token"),
            Err(AuthError::TokenInvalid(_))
        ));
    }

    #[tokio::test]
    async fn test_update_credentials_none_keeps_password() {
        let (repo, config) = setup();
        let registered = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        let service = CredentialService::new(repo, config);

        let changed = service
            .update_credentials(registered.user.user_id, None)
            .await
            .unwrap();
        assert!(!changed);

        let email = Email::new("alice@example.com").unwrap();
        assert!(service.verify_credentials(&email, &raw("s3cret!")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_credentials_replaces_password() {
        let (repo, config) = setup();
        let registered = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        let service = CredentialService::new(repo, config);

        let changed = service
            .update_credentials(registered.user.user_id, Some(&raw("n3w-pass")))
            .await
            .unwrap();
        assert!(changed);

        let email = Email::new("alice@example.com").unwrap();
        assert!(service.verify_credentials(&email, &raw("n3w-pass")).await.is_ok());
        assert!(matches!(
            service.verify_credentials(&email, &raw("s3cret!")).await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kernel::id::UserId;
    use kernel::identity::CurrentUser;

    use super::support::{register, setup};
    use crate::application::config::AuthConfig;
    use crate::application::{
        DeleteUserUseCase, GetUserUseCase, LoginInput, LoginUseCase, RegisterInput,
        RegisterUseCase, UpdateUserInput, UpdateUserUseCase,
    };
    use crate::domain::entity::user::{NewUser, ProfileChanges, User};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{email::Email, user_password::UserPassword};
    use crate::error::{AuthError, AuthResult};
    use crate::infra::memory::MemoryUserRepository;

    fn actor(user_id: UserId) -> CurrentUser {
        CurrentUser::new(user_id, "actor")
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let (repo, config) = setup();
        register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;

        let result = RegisterUseCase::new(repo, config)
            .execute(RegisterInput {
                name: "other".to_string(),
                email: "ALICE@example.com".to_string(),
                password: "whatever".to_string(),
                avatar_path: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let (repo, config) = setup();
        let use_case = RegisterUseCase::new(repo, config);

        let empty_name = use_case
            .execute(RegisterInput {
                name: "   ".to_string(),
                email: "a@example.com".to_string(),
                password: "pw".to_string(),
                avatar_path: None,
            })
            .await;
        assert!(matches!(empty_name, Err(AuthError::Validation(_))));

        let long_name = use_case
            .execute(RegisterInput {
                name: "n".repeat(51),
                email: "a@example.com".to_string(),
                password: "pw".to_string(),
                avatar_path: None,
            })
            .await;
        assert!(matches!(long_name, Err(AuthError::Validation(_))));

        let bad_email = use_case
            .execute(RegisterInput {
                name: "alice".to_string(),
                email: "not-an-email".to_string(),
                password: "pw".to_string(),
                avatar_path: None,
            })
            .await;
        assert!(matches!(bad_email, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_returns_token_for_user() {
        let (repo, config) = setup();
        let registered = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;

        let output = LoginUseCase::new(repo, config)
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "s3cret!".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.user.user_id, registered.user.user_id);
        assert!(!output.token.is_empty());
    }

    #[tokio::test]
    async fn test_update_other_user_forbidden() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        let bob = register(&repo, &config, "bob", "bob@example.com", "s3cret!").await;

        let result = UpdateUserUseCase::new(repo, config)
            .execute(
                &actor(bob.user.user_id),
                alice.user.user_id,
                UpdateUserInput {
                    name: Some("mallory".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AuthError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_empty_fields_leave_profile_unchanged() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;

        let user = UpdateUserUseCase::new(repo.clone(), config.clone())
            .execute(
                &actor(alice.user.user_id),
                alice.user.user_id,
                UpdateUserInput {
                    name: Some(String::new()),
                    email: Some(String::new()),
                    password: Some(String::new()),
                    avatar_path: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(user.name.as_str(), "alice");
        assert_eq!(user.email.as_str(), "alice@example.com");

        let login = LoginUseCase::new(repo, config)
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "s3cret!".to_string(),
            })
            .await;
        assert!(login.is_ok());
    }

    #[tokio::test]
    async fn test_update_name_and_email() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;

        let user = UpdateUserUseCase::new(repo, config)
            .execute(
                &actor(alice.user.user_id),
                alice.user.user_id,
                UpdateUserInput {
                    name: Some("Alice B.".to_string()),
                    email: Some("alice.b@example.com".to_string()),
                    password: None,
                    avatar_path: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(user.name.as_str(), "Alice B.");
        assert_eq!(user.email.as_str(), "alice.b@example.com");
    }

    #[tokio::test]
    async fn test_update_email_taken_by_other_user() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        register(&repo, &config, "bob", "bob@example.com", "s3cret!").await;

        let result = UpdateUserUseCase::new(repo, config)
            .execute(
                &actor(alice.user.user_id),
                alice.user.user_id,
                UpdateUserInput {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_deleted_user_disappears() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;
        let user_id = alice.user.user_id;

        DeleteUserUseCase::new(repo.clone())
            .execute(&actor(user_id), user_id)
            .await
            .unwrap();

        assert!(matches!(
            GetUserUseCase::new(repo.clone()).execute(user_id).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(
            DeleteUserUseCase::new(repo.clone())
                .execute(&actor(user_id), user_id)
                .await,
            Err(AuthError::UserNotFound)
        ));

        let login = LoginUseCase::new(repo.clone(), config.clone())
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "s3cret!".to_string(),
            })
            .await;
        assert!(matches!(login, Err(AuthError::InvalidCredentials)));

        // The address is free again once its owner is gone
        let again = register(&repo, &config, "alice2", "alice@example.com", "s3cret!").await;
        assert_ne!(again.user.user_id, user_id);
    }

    #[tokio::test]
    async fn test_avatar_path_on_register_and_update() {
        let (repo, config) = setup();
        let registered = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(RegisterInput {
                name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "s3cret!".to_string(),
                avatar_path: Some("images/users/alice.png".to_string()),
            })
            .await
            .unwrap();
        let user_id = registered.user.user_id;
        assert_eq!(
            registered.user.avatar_path.as_deref(),
            Some("images/users/alice.png")
        );

        let use_case = UpdateUserUseCase::new(repo.clone(), config);
        let updated = use_case
            .execute(
                &actor(user_id),
                user_id,
                UpdateUserInput {
                    avatar_path: Some("images/users/alice-2.png".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            updated.avatar_path.as_deref(),
            Some("images/users/alice-2.png")
        );
        assert_eq!(updated.name.as_str(), "alice");

        let too_long = use_case
            .execute(
                &actor(user_id),
                user_id,
                UpdateUserInput {
                    avatar_path: Some("a".repeat(101)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(too_long, Err(AuthError::Validation(_))));

        let stored = GetUserUseCase::new(repo).execute(user_id).await.unwrap();
        assert_eq!(
            stored.avatar_path.as_deref(),
            Some("images/users/alice-2.png")
        );
    }

    #[tokio::test]
    async fn test_update_writes_profile_and_password_together() {
        let repo = Arc::new(CountingRepository::default());
        let config = Arc::new(AuthConfig::development());
        let registered = RegisterUseCase::new(repo.clone(), config.clone())
            .execute(RegisterInput {
                name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "s3cret!".to_string(),
                avatar_path: None,
            })
            .await
            .unwrap();
        let user_id = registered.user.user_id;

        let user = UpdateUserUseCase::new(repo.clone(), config.clone())
            .execute(
                &actor(user_id),
                user_id,
                UpdateUserInput {
                    name: Some("Alice B.".to_string()),
                    password: Some("n3w-pass".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(user.name.as_str(), "Alice B.");
        assert_eq!(repo.profile_writes.load(Ordering::SeqCst), 1);
        assert_eq!(repo.password_writes.load(Ordering::SeqCst), 0);

        let login = LoginUseCase::new(repo, config)
            .execute(LoginInput {
                email: "alice@example.com".to_string(),
                password: "n3w-pass".to_string(),
            })
            .await;
        assert!(login.is_ok());
    }

    /// Memory repository that counts profile and password writes
    #[derive(Clone, Default)]
    struct CountingRepository {
        inner: MemoryUserRepository,
        profile_writes: Arc<AtomicUsize>,
        password_writes: Arc<AtomicUsize>,
    }

    impl UserRepository for CountingRepository {
        async fn create(&self, user: &NewUser) -> AuthResult<User> {
            self.inner.create(user).await
        }

        async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
            self.inner.find_by_id(user_id).await
        }

        async fn find_credential_by_email(
            &self,
            email: &Email,
        ) -> AuthResult<Option<(User, UserPassword)>> {
            self.inner.find_credential_by_email(email).await
        }

        async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
            self.inner.exists_by_email(email).await
        }

        async fn update_profile(
            &self,
            user_id: UserId,
            changes: &ProfileChanges,
        ) -> AuthResult<Option<User>> {
            self.profile_writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update_profile(user_id, changes).await
        }

        async fn update_password(
            &self,
            user_id: UserId,
            password: &UserPassword,
        ) -> AuthResult<()> {
            self.password_writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update_password(user_id, password).await
        }

        async fn soft_delete(&self, user_id: UserId) -> AuthResult<bool> {
            self.inner.soft_delete(user_id).await
        }
    }

    #[tokio::test]
    async fn test_delete_other_user_forbidden() {
        let (repo, config) = setup();
        let alice = register(&repo, &config, "alice", "alice@example.com", "s3cret!").await;

        let result = DeleteUserUseCase::new(repo)
            .execute(&actor(UserId::new(999)), alice.user.user_id)
            .await;

        assert!(matches!(result, Err(AuthError::Forbidden)));
    }
}

#[cfg(test)]
mod http_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::infra::memory::MemoryUserRepository;
    use crate::presentation::{AuthAppState, auth_router_generic, identify_viewer};

    fn app() -> Router {
        let state = AuthAppState::new(MemoryUserRepository::new(), AuthConfig::development());
        auth_router_generic(state.clone()).layer(axum::middleware::from_fn_with_state(
            state,
            identify_viewer::<MemoryUserRepository>,
        ))
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_user(app: &Router, name: &str, email: &str) -> (i64, String) {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users",
                None,
                json!({ "name": name, "email": email, "password": "s3cret!" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        (
            body["user"]["id"].as_i64().unwrap(),
            body["token"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let app = app();
        let (id, _) = register_user(&app, "alice", "alice@example.com").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                json!({ "email": "alice@example.com", "password": "s3cret!" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["user"]["id"].as_i64(), Some(id));
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert!(body["token"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_register_with_avatar_path() {
        let app = app();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users",
                None,
                json!({
                    "name": "alice",
                    "email": "alice@example.com",
                    "password": "s3cret!",
                    "avatarPath": "images/users/alice.png"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        let id = body["user"]["id"].as_i64().unwrap();
        assert_eq!(body["user"]["avatarPath"], "images/users/alice.png");

        let response = app
            .oneshot(get_request(&format!("/users/{}", id), None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["avatarPath"], "images/users/alice.png");
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let app = app();
        register_user(&app, "alice", "alice@example.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/login",
                None,
                json!({ "email": "alice@example.com", "password": "nope" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_409() {
        let app = app();
        register_user(&app, "alice", "alice@example.com").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/users",
                None,
                json!({ "name": "bob", "email": "alice@example.com", "password": "pw" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_user_requires_token() {
        let app = app();
        let (id, _) = register_user(&app, "alice", "alice@example.com").await;

        let response = app
            .oneshot(get_request(&format!("/users/{}", id), None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_401() {
        let app = app();
        let (id, _) = register_user(&app, "alice", "alice@example.com").await;

        for authorization in ["Bearer garbage", "Basic abc", "Bearer "] {
            let response = app
                .clone()
                .oneshot(get_request(&format!("/users/{}", id), Some(authorization)))
                .await
                .unwrap();
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "{} should be rejected",
                authorization
            );
        }
    }

    #[tokio::test]
    async fn test_get_user_hides_email_from_others() {
        let app = app();
        let (alice_id, alice_token) = register_user(&app, "alice", "alice@example.com").await;
        let (bob_id, _) = register_user(&app, "bob", "bob@example.com").await;

        let bearer = format!("bearer {}", alice_token);

        let own = app
            .clone()
            .oneshot(get_request(&format!("/users/{}", alice_id), Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(own.status(), StatusCode::OK);
        assert_eq!(body_json(own).await["email"], "alice@example.com");

        let other = app
            .clone()
            .oneshot(get_request(&format!("/users/{}", bob_id), Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(other.status(), StatusCode::OK);
        let body = body_json(other).await;
        assert_eq!(body["name"], "bob");
        assert!(body.get("email").is_none());

        let missing = app
            .oneshot(get_request("/users/0", Some(&bearer)))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_and_delete_own_account() {
        let app = app();
        let (id, token) = register_user(&app, "alice", "alice@example.com").await;
        let (bob_id, _) = register_user(&app, "bob", "bob@example.com").await;

        let updated = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/users/{}", id),
                Some(&token),
                json!({ "name": "Alice", "email": "" }),
            ))
            .await
            .unwrap();
        assert_eq!(updated.status(), StatusCode::OK);
        let body = body_json(updated).await;
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["email"], "alice@example.com");

        let forbidden = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/users/{}", bob_id))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/users/{}", id))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use platform::token::TokenError;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::UserNotFound, StatusCode::NOT_FOUND),
            (AuthError::EmailTaken, StatusCode::CONFLICT),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (
                AuthError::Validation("bad".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AuthError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                AuthError::TokenInvalid(TokenError::Expired),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AuthError::Signing(TokenError::MissingSecret),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Database(sqlx::Error::RowNotFound),
                StatusCode::NOT_FOUND,
            ),
            (
                AuthError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_server_errors_hide_details() {
        let app_error = AuthError::Internal("connection string leaked".into()).to_app_error();
        assert!(!app_error.message().contains("leaked"));
    }

    #[test]
    fn test_error_display() {
        assert!(AuthError::EmailTaken.to_string().contains("Email"));
        assert!(
            AuthError::InvalidCredentials
                .to_string()
                .contains("Invalid email or password")
        );
    }
}
