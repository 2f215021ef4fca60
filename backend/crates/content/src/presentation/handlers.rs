//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::{CommentId, Id, PostId, UserId};
use kernel::identity::CurrentUser;
use std::sync::Arc;

use crate::application::config::ContentConfig;
use crate::application::{
    AddFavoriteUseCase, ContentQueryEngine, CreateCommentUseCase, CreatePostUseCase,
    DeleteCommentUseCase, DeletePostUseCase, RemoveFavoriteUseCase, UpdatePostUseCase,
};
use crate::domain::repository::ContentStore;
use crate::domain::value_objects::{CommentBody, PostContent, PostFilter, PostQuery};
use crate::error::{ContentError, ContentResult};
use crate::presentation::dto::{
    CommentListResponse, CommentRequest, CommentResponse, FavoriteResponse, ListPostsParams,
    PageParams, PostListResponse, PostRequest, PostResponse,
};

/// Shared state for content handlers
#[derive(Clone)]
pub struct ContentAppState<R>
where
    R: ContentStore,
{
    pub repo: Arc<R>,
    pub config: Arc<ContentConfig>,
}

impl<R> ContentAppState<R>
where
    R: ContentStore,
{
    pub fn new(repo: R, config: ContentConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }

    fn engine(&self) -> ContentQueryEngine<R> {
        ContentQueryEngine::new(self.repo.clone())
    }
}

/// Path ids start at 1
fn path_id<T>(raw: i64, missing: ContentError) -> ContentResult<Id<T>> {
    Id::from_positive(raw).ok_or(missing)
}

fn post_content(req: PostRequest) -> ContentResult<PostContent> {
    PostContent::new(req.title, req.speaker, req.detail, req.movie_url)
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/v1/posts
pub async fn list_posts<R>(
    State(state): State<ContentAppState<R>>,
    viewer: Option<CurrentUser>,
    Query(params): Query<ListPostsParams>,
) -> ContentResult<Json<PostListResponse>>
where
    R: ContentStore,
{
    let author = match params.post_user_id {
        None | Some(0) => None,
        Some(raw) => Some(UserId::from_positive(raw).ok_or_else(|| {
            ContentError::Validation("post_user_id must not be negative".to_string())
        })?),
    };

    let query = PostQuery {
        pagination: state.config.pagination(params.limit, params.page)?,
        filter: PostFilter {
            keyword: state.config.keyword(params.keyword)?,
            author,
        },
        viewer: viewer.map(|viewer| viewer.user_id),
    };

    let page = state.engine().list_posts(&query).await?;

    Ok(Json(page.into()))
}

/// GET /api/v1/posts/{id}
pub async fn get_post<R>(
    State(state): State<ContentAppState<R>>,
    viewer: Option<CurrentUser>,
    Path(id): Path<i64>,
) -> ContentResult<Json<PostResponse>>
where
    R: ContentStore,
{
    let post_id: PostId = path_id(id, ContentError::PostNotFound)?;
    let item = state
        .engine()
        .get_post(post_id, viewer.map(|viewer| viewer.user_id))
        .await?;

    Ok(Json(item.into()))
}

/// POST /api/v1/posts
pub async fn create_post<R>(
    State(state): State<ContentAppState<R>>,
    current: CurrentUser,
    Json(req): Json<PostRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: ContentStore,
{
    let content = post_content(req)?;
    let post = CreatePostUseCase::new(state.repo.clone())
        .execute(&current, content)
        .await?;

    let item = state
        .engine()
        .get_post(post.post_id, Some(current.user_id))
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(item))))
}

/// PUT /api/v1/posts/{id}
pub async fn update_post<R>(
    State(state): State<ContentAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<PostRequest>,
) -> ContentResult<Json<PostResponse>>
where
    R: ContentStore,
{
    let post_id: PostId = path_id(id, ContentError::PostNotFound)?;
    let content = post_content(req)?;

    UpdatePostUseCase::new(state.repo.clone())
        .execute(&current, post_id, content)
        .await?;

    let item = state
        .engine()
        .get_post(post_id, Some(current.user_id))
        .await?;

    Ok(Json(item.into()))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post<R>(
    State(state): State<ContentAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ContentResult<StatusCode>
where
    R: ContentStore,
{
    let post_id: PostId = path_id(id, ContentError::PostNotFound)?;
    DeletePostUseCase::new(state.repo.clone())
        .execute(&current, post_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/v1/posts/{id}/comments
pub async fn list_comments<R>(
    State(state): State<ContentAppState<R>>,
    Path(id): Path<i64>,
    Query(params): Query<PageParams>,
) -> ContentResult<Json<CommentListResponse>>
where
    R: ContentStore,
{
    let post_id: PostId = path_id(id, ContentError::PostNotFound)?;
    let pagination = state.config.pagination(params.limit, params.page)?;

    let page = state.engine().list_comments(post_id, pagination).await?;

    Ok(Json(page.into()))
}

/// POST /api/v1/posts/{id}/comments
pub async fn create_comment<R>(
    State(state): State<ContentAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> ContentResult<impl IntoResponse>
where
    R: ContentStore,
{
    let post_id: PostId = path_id(id, ContentError::PostNotFound)?;
    let body = CommentBody::new(req.body)?;

    let comment = CreateCommentUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&current, post_id, body)
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete_comment<R>(
    State(state): State<ContentAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ContentResult<StatusCode>
where
    R: ContentStore,
{
    let comment_id: CommentId = path_id(id, ContentError::CommentNotFound)?;
    DeleteCommentUseCase::new(state.repo.clone())
        .execute(&current, comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Favorites
// ============================================================================

/// POST /api/v1/posts/{id}/favorites
pub async fn add_favorite<R>(
    State(state): State<ContentAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ContentResult<impl IntoResponse>
where
    R: ContentStore,
{
    let post_id: PostId = path_id(id, ContentError::PostNotFound)?;
    let favorite = AddFavoriteUseCase::new(state.repo.clone(), state.repo.clone())
        .execute(&current, post_id)
        .await?;

    Ok((StatusCode::CREATED, Json(FavoriteResponse::from(favorite))))
}

/// DELETE /api/v1/posts/{id}/favorites
pub async fn remove_favorite<R>(
    State(state): State<ContentAppState<R>>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> ContentResult<StatusCode>
where
    R: ContentStore,
{
    let post_id: PostId = path_id(id, ContentError::FavoriteNotFound)?;
    RemoveFavoriteUseCase::new(state.repo.clone())
        .execute(&current, post_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/favorites
pub async fn list_favorites<R>(
    State(state): State<ContentAppState<R>>,
    current: CurrentUser,
    Query(params): Query<PageParams>,
) -> ContentResult<Json<PostListResponse>>
where
    R: ContentStore,
{
    let pagination = state.config.pagination(params.limit, params.page)?;
    let page = state
        .engine()
        .list_favorites(current.user_id, pagination)
        .await?;

    Ok(Json(page.into()))
}
