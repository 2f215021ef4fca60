//! Content Router

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::application::config::ContentConfig;
use crate::domain::repository::ContentStore;
use crate::infra::postgres::PgContentRepository;
use crate::presentation::handlers::{self, ContentAppState};

/// Create the Content router with PostgreSQL repository
pub fn content_router(repo: PgContentRepository, config: ContentConfig) -> Router {
    content_router_generic(ContentAppState::new(repo, config))
}

/// Create a generic Content router for any repository implementation
///
/// Handlers read the caller from the `CurrentUser` request extension, so the
/// identity middleware must wrap this router.
pub fn content_router_generic<R>(state: ContentAppState<R>) -> Router
where
    R: ContentStore,
{
    Router::new()
        .route(
            "/posts",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route(
            "/posts/{id}",
            get(handlers::get_post::<R>)
                .put(handlers::update_post::<R>)
                .delete(handlers::delete_post::<R>),
        )
        .route(
            "/posts/{id}/comments",
            get(handlers::list_comments::<R>).post(handlers::create_comment::<R>),
        )
        .route("/comments/{id}", delete(handlers::delete_comment::<R>))
        .route(
            "/posts/{id}/favorites",
            post(handlers::add_favorite::<R>).delete(handlers::remove_favorite::<R>),
        )
        .route("/favorites", get(handlers::list_favorites::<R>))
        .with_state(state)
}
