//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//! Every read filters out soft-deleted rows and rows whose author is
//! soft-deleted. The per-post comment and favorite counts are the exception:
//! they keep rows by soft-deleted users.

use kernel::id::{CommentId, PostId, UserId};

use crate::domain::entities::{
    Comment, CommentListItem, Favorite, NewComment, NewPost, Post, PostView,
};
use crate::domain::value_objects::{Pagination, PostContent, PostFilter};
use crate::error::ContentResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn create_post(&self, post: &NewPost) -> ContentResult<Post>;

    /// Live post with a live author
    async fn find_post(&self, post_id: PostId) -> ContentResult<Option<Post>>;

    /// Replace title, speaker, detail and movie URL; `None` if the post is gone
    async fn update_post(
        &self,
        post_id: PostId,
        content: &PostContent,
    ) -> ContentResult<Option<Post>>;

    /// Returns false if there was no live post to delete
    async fn soft_delete_post(&self, post_id: PostId) -> ContentResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn create_comment(&self, comment: &NewComment) -> ContentResult<Comment>;

    async fn find_comment(&self, comment_id: CommentId) -> ContentResult<Option<Comment>>;

    async fn soft_delete_comment(&self, comment_id: CommentId) -> ContentResult<bool>;
}

/// Favorite repository trait
#[trait_variant::make(FavoriteRepository: Send)]
pub trait LocalFavoriteRepository {
    /// Fails with `AlreadyFavorited` if the pair exists
    async fn add_favorite(&self, user_id: UserId, post_id: PostId) -> ContentResult<Favorite>;

    /// Returns false if the pair did not exist
    async fn remove_favorite(&self, user_id: UserId, post_id: PostId) -> ContentResult<bool>;
}

/// Read-side queries behind the listing endpoints.
///
/// Each `count_*` uses the same filter as its `fetch_*` counterpart, so
/// counts and pages agree on what exists. Fetches are ordered by id
/// descending.
#[trait_variant::make(ContentQueryRepository: Send)]
pub trait LocalContentQueryRepository {
    async fn count_posts(&self, filter: &PostFilter) -> ContentResult<i64>;

    async fn fetch_posts(
        &self,
        filter: &PostFilter,
        viewer: Option<UserId>,
        pagination: Pagination,
    ) -> ContentResult<Vec<PostView>>;

    async fn fetch_post(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> ContentResult<Option<PostView>>;

    async fn count_comments(&self, post_id: PostId) -> ContentResult<i64>;

    async fn fetch_comments(
        &self,
        post_id: PostId,
        pagination: Pagination,
    ) -> ContentResult<Vec<CommentListItem>>;

    async fn count_favorites(&self, user_id: UserId) -> ContentResult<i64>;

    async fn fetch_favorites(
        &self,
        user_id: UserId,
        pagination: Pagination,
    ) -> ContentResult<Vec<PostView>>;
}

/// Everything the content HTTP layer needs from one storage backend
pub trait ContentStore:
    PostRepository
    + CommentRepository
    + FavoriteRepository
    + ContentQueryRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> ContentStore for T where
    T: PostRepository
        + CommentRepository
        + FavoriteRepository
        + ContentQueryRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
