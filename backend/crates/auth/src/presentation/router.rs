//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    auth_router_generic(AuthAppState::new(repo, config))
}

/// Create a generic Auth router for any repository implementation
///
/// Routes that need identity expect [`crate::presentation::middleware::identify_viewer`]
/// to be layered around the final router.
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/users", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .with_state(state)
}
