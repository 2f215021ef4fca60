//! In-memory repository
//!
//! Same contract as [`super::postgres::PgContentRepository`]: soft-deleted
//! rows and rows by soft-deleted users are invisible, listings are ordered
//! by id descending, and (user, post) favorites are unique. The per-post
//! counts skip only soft-deleted comments, whoever wrote them. Authors live in
//! the users table owned by the auth crate, so tests register them here with
//! [`MemoryContentRepository::add_user`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, FavoriteId, PostId, UserId};
use tokio::sync::Mutex;

use crate::domain::entities::{
    Author, Comment, CommentListItem, Favorite, NewComment, NewPost, Post, PostView,
};
use crate::domain::repository::{
    CommentRepository, ContentQueryRepository, FavoriteRepository, PostRepository,
};
use crate::domain::value_objects::{Pagination, PostContent, PostFilter};
use crate::error::{ContentError, ContentResult};

#[derive(Debug, Clone)]
struct StoredUser {
    name: String,
    avatar_path: Option<String>,
    deleted: bool,
}

#[derive(Debug, Clone)]
struct Stored<T> {
    row: T,
    deleted_at: Option<DateTime<Utc>>,
}

impl<T> Stored<T> {
    fn new(row: T) -> Self {
        Self {
            row,
            deleted_at: None,
        }
    }

    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Debug, Default)]
struct State {
    next_post_id: i64,
    next_comment_id: i64,
    next_favorite_id: i64,
    users: BTreeMap<UserId, StoredUser>,
    posts: BTreeMap<PostId, Stored<Post>>,
    comments: BTreeMap<CommentId, Stored<Comment>>,
    favorites: BTreeMap<FavoriteId, Favorite>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryContentRepository {
    state: Arc<Mutex<State>>,
}

impl MemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an author
    pub async fn add_user(&self, user_id: UserId, name: &str, avatar_path: Option<&str>) {
        let mut state = self.state.lock().await;
        state.users.insert(
            user_id,
            StoredUser {
                name: name.to_string(),
                avatar_path: avatar_path.map(str::to_string),
                deleted: false,
            },
        );
    }

    /// Mirror an account deletion
    pub async fn soft_delete_user(&self, user_id: UserId) {
        let mut state = self.state.lock().await;
        if let Some(user) = state.users.get_mut(&user_id) {
            user.deleted = true;
        }
    }
}

impl State {
    fn author(&self, user_id: UserId) -> Option<Author> {
        self.users
            .get(&user_id)
            .filter(|user| !user.deleted)
            .map(|user| Author {
                user_id,
                name: user.name.clone(),
                avatar_path: user.avatar_path.clone(),
            })
    }

    fn user_is_live(&self, user_id: UserId) -> bool {
        self.users.get(&user_id).is_some_and(|user| !user.deleted)
    }

    fn live_post(&self, post_id: PostId) -> Option<&Post> {
        self.posts
            .get(&post_id)
            .filter(|stored| stored.is_live() && self.user_is_live(stored.row.user_id))
            .map(|stored| &stored.row)
    }

    /// Live posts by live authors, newest first
    fn live_posts(&self) -> impl Iterator<Item = &Post> + '_ {
        self.posts
            .values()
            .rev()
            .filter(move |stored| stored.is_live() && self.user_is_live(stored.row.user_id))
            .map(|stored| &stored.row)
    }

    /// Live comments by live authors on a live post, newest first
    fn live_comments(&self, post_id: PostId) -> impl Iterator<Item = &Comment> + '_ {
        let post_is_live = self.live_post(post_id).is_some();
        self.comments
            .values()
            .rev()
            .filter(move |stored| {
                post_is_live
                    && stored.is_live()
                    && stored.row.post_id == post_id
                    && self.user_is_live(stored.row.user_id)
            })
            .map(|stored| &stored.row)
    }

    fn has_favorite(&self, user_id: UserId, post_id: PostId) -> bool {
        self.favorites
            .values()
            .any(|favorite| favorite.user_id == user_id && favorite.post_id == post_id)
    }

    /// Live posts the user has favorited, newest post first
    fn favorited_posts(&self, user_id: UserId) -> Vec<&Post> {
        self.live_posts()
            .filter(|post| self.has_favorite(user_id, post.post_id))
            .collect()
    }

    fn view(&self, post: &Post, viewer: Option<UserId>) -> Option<PostView> {
        let author = self.author(post.user_id)?;
        let comment_count = self
            .comments
            .values()
            .filter(|stored| stored.is_live() && stored.row.post_id == post.post_id)
            .count() as i64;
        let favorite_count = self
            .favorites
            .values()
            .filter(|favorite| favorite.post_id == post.post_id)
            .count() as i64;
        let is_favorited = viewer.is_some_and(|viewer| self.has_favorite(viewer, post.post_id));

        Some(PostView {
            post: post.clone(),
            author,
            comment_count,
            favorite_count,
            is_favorited,
        })
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for MemoryContentRepository {
    async fn create_post(&self, post: &NewPost) -> ContentResult<Post> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&post.user_id) {
            return Err(ContentError::Internal(format!(
                "Unknown author {}",
                post.user_id
            )));
        }

        state.next_post_id += 1;
        let now = Utc::now();
        let created = Post {
            post_id: PostId::new(state.next_post_id),
            user_id: post.user_id,
            title: post.content.title().to_string(),
            speaker: post.content.speaker().to_string(),
            detail: post.content.detail().to_string(),
            movie_url: post.content.movie_url().to_string(),
            created_at: now,
            updated_at: now,
        };
        state
            .posts
            .insert(created.post_id, Stored::new(created.clone()));

        Ok(created)
    }

    async fn find_post(&self, post_id: PostId) -> ContentResult<Option<Post>> {
        let state = self.state.lock().await;
        Ok(state.live_post(post_id).cloned())
    }

    async fn update_post(
        &self,
        post_id: PostId,
        content: &PostContent,
    ) -> ContentResult<Option<Post>> {
        let mut state = self.state.lock().await;
        Ok(state
            .posts
            .get_mut(&post_id)
            .filter(|stored| stored.is_live())
            .map(|stored| {
                stored.row.title = content.title().to_string();
                stored.row.speaker = content.speaker().to_string();
                stored.row.detail = content.detail().to_string();
                stored.row.movie_url = content.movie_url().to_string();
                stored.row.updated_at = Utc::now();
                stored.row.clone()
            }))
    }

    async fn soft_delete_post(&self, post_id: PostId) -> ContentResult<bool> {
        let mut state = self.state.lock().await;
        Ok(match state.posts.get_mut(&post_id) {
            Some(stored) if stored.is_live() => {
                stored.deleted_at = Some(Utc::now());
                true
            }
            _ => false,
        })
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for MemoryContentRepository {
    async fn create_comment(&self, comment: &NewComment) -> ContentResult<Comment> {
        let mut state = self.state.lock().await;
        if !state.posts.contains_key(&comment.post_id) {
            return Err(ContentError::PostNotFound);
        }

        state.next_comment_id += 1;
        let now = Utc::now();
        let created = Comment {
            comment_id: CommentId::new(state.next_comment_id),
            post_id: comment.post_id,
            user_id: comment.user_id,
            body: comment.body.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        state
            .comments
            .insert(created.comment_id, Stored::new(created.clone()));

        Ok(created)
    }

    async fn find_comment(&self, comment_id: CommentId) -> ContentResult<Option<Comment>> {
        let state = self.state.lock().await;
        Ok(state
            .comments
            .get(&comment_id)
            .filter(|stored| stored.is_live())
            .map(|stored| stored.row.clone()))
    }

    async fn soft_delete_comment(&self, comment_id: CommentId) -> ContentResult<bool> {
        let mut state = self.state.lock().await;
        Ok(match state.comments.get_mut(&comment_id) {
            Some(stored) if stored.is_live() => {
                stored.deleted_at = Some(Utc::now());
                true
            }
            _ => false,
        })
    }
}

// ============================================================================
// Favorite Repository Implementation
// ============================================================================

impl FavoriteRepository for MemoryContentRepository {
    async fn add_favorite(&self, user_id: UserId, post_id: PostId) -> ContentResult<Favorite> {
        let mut state = self.state.lock().await;
        if state.has_favorite(user_id, post_id) {
            return Err(ContentError::AlreadyFavorited);
        }

        state.next_favorite_id += 1;
        let favorite = Favorite {
            favorite_id: FavoriteId::new(state.next_favorite_id),
            user_id,
            post_id,
            created_at: Utc::now(),
        };
        state
            .favorites
            .insert(favorite.favorite_id, favorite.clone());

        Ok(favorite)
    }

    async fn remove_favorite(&self, user_id: UserId, post_id: PostId) -> ContentResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.favorites.len();
        state
            .favorites
            .retain(|_, favorite| !(favorite.user_id == user_id && favorite.post_id == post_id));
        Ok(state.favorites.len() < before)
    }
}

// ============================================================================
// Content Query Repository Implementation
// ============================================================================

impl ContentQueryRepository for MemoryContentRepository {
    async fn count_posts(&self, filter: &PostFilter) -> ContentResult<i64> {
        let state = self.state.lock().await;
        Ok(state.live_posts().filter(|post| filter.matches(post)).count() as i64)
    }

    async fn fetch_posts(
        &self,
        filter: &PostFilter,
        viewer: Option<UserId>,
        pagination: Pagination,
    ) -> ContentResult<Vec<PostView>> {
        let state = self.state.lock().await;
        let page = pagination.apply(state.live_posts().filter(|post| filter.matches(post)));
        Ok(page
            .into_iter()
            .filter_map(|post| state.view(post, viewer))
            .collect())
    }

    async fn fetch_post(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> ContentResult<Option<PostView>> {
        let state = self.state.lock().await;
        Ok(state
            .live_post(post_id)
            .and_then(|post| state.view(post, viewer)))
    }

    async fn count_comments(&self, post_id: PostId) -> ContentResult<i64> {
        let state = self.state.lock().await;
        Ok(state.live_comments(post_id).count() as i64)
    }

    async fn fetch_comments(
        &self,
        post_id: PostId,
        pagination: Pagination,
    ) -> ContentResult<Vec<CommentListItem>> {
        let state = self.state.lock().await;
        let page = pagination.apply(state.live_comments(post_id));
        Ok(page
            .into_iter()
            .filter_map(|comment| {
                state.author(comment.user_id).map(|author| CommentListItem {
                    comment: comment.clone(),
                    author,
                })
            })
            .collect())
    }

    async fn count_favorites(&self, user_id: UserId) -> ContentResult<i64> {
        let state = self.state.lock().await;
        Ok(state.favorited_posts(user_id).len() as i64)
    }

    async fn fetch_favorites(
        &self,
        user_id: UserId,
        pagination: Pagination,
    ) -> ContentResult<Vec<PostView>> {
        let state = self.state.lock().await;
        let page = pagination.apply(state.favorited_posts(user_id));
        Ok(page
            .into_iter()
            .filter_map(|post| state.view(post, Some(user_id)))
            .collect())
    }
}
