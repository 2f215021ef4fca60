//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::UserId;
use kernel::identity::CurrentUser;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    DeleteUserUseCase, GetUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateUserInput, UpdateUserUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateUserRequest, UserResponse,
};

/// Shared state for auth handlers and the identity middleware
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

/// Path ids start at 1; anything else cannot exist
fn user_id_from_path(raw: i64) -> AuthResult<UserId> {
    UserId::from_positive(raw).ok_or(AuthError::UserNotFound)
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/v1/users
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            avatar_path: req.avatar_path,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: output.token,
            user: UserResponse::own(output.user),
        }),
    ))
}

/// POST /api/v1/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        token: output.token,
        user: UserResponse::own(output.user),
    }))
}

// ============================================================================
// Users (require authentication)
// ============================================================================

/// GET /api/v1/users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = user_id_from_path(id)?;
    let user = GetUserUseCase::new(state.repo.clone())
        .execute(user_id)
        .await?;

    let response = if current.user_id == user_id {
        UserResponse::own(user)
    } else {
        UserResponse::public(user)
    };

    Ok(Json(response))
}

/// PUT /api/v1/users/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = user_id_from_path(id)?;
    let use_case = UpdateUserUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(
            &current,
            user_id,
            UpdateUserInput {
                name: req.name,
                email: req.email,
                password: req.password,
                avatar_path: req.avatar_path,
            },
        )
        .await?;

    Ok(Json(UserResponse::own(user)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = user_id_from_path(id)?;
    DeleteUserUseCase::new(state.repo.clone())
        .execute(&current, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
