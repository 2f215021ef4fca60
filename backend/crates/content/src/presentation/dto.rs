//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, FavoriteId, PostId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Author, Comment, CommentListItem, Favorite, PostListItem};
use crate::domain::value_objects::Page;

// ============================================================================
// Query strings
// ============================================================================

/// Query for GET /api/v1/posts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsParams {
    pub limit: Option<i64>,
    pub page: Option<i64>,
    pub keyword: Option<String>,
    /// 0 or absent means any author
    pub post_user_id: Option<i64>,
}

/// Query for the other listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body for POST /api/v1/posts and PUT /api/v1/posts/{id}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub speaker: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub movie_url: String,
}

/// Body for POST /api/v1/posts/{id}/comments
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub body: String,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: UserId,
    pub name: String,
    pub avatar_path: Option<String>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.user_id,
            name: author.name,
            avatar_path: author.avatar_path,
        }
    }
}

/// One post with its aggregates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub speaker: String,
    pub detail: String,
    pub movie_url: String,
    pub embed_movie_url: String,
    pub author: AuthorResponse,
    pub comment_count: i64,
    pub favorite_count: i64,
    pub is_favorited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostListItem> for PostResponse {
    fn from(item: PostListItem) -> Self {
        let post = item.post;
        Self {
            id: post.post_id,
            user_id: post.user_id,
            title: post.title,
            speaker: post.speaker,
            detail: post.detail,
            movie_url: post.movie_url,
            embed_movie_url: item.embed_movie_url,
            author: item.author.into(),
            comment_count: item.comment_count,
            favorite_count: item.favorite_count,
            is_favorited: item.is_favorited,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Response for GET /api/v1/posts and GET /api/v1/favorites
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub total_count: i64,
    pub posts: Vec<PostResponse>,
}

impl From<Page<PostListItem>> for PostListResponse {
    fn from(page: Page<PostListItem>) -> Self {
        Self {
            total_count: page.total_count,
            posts: page.items.into_iter().map(PostResponse::from).collect(),
        }
    }
}

/// Comment as stored
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}

/// Comment plus author, as listed
#[derive(Debug, Clone, Serialize)]
pub struct CommentItemResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub author: AuthorResponse,
}

/// Response for GET /api/v1/posts/{id}/comments
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListResponse {
    pub total_count: i64,
    pub comments: Vec<CommentItemResponse>,
}

impl From<Page<CommentListItem>> for CommentListResponse {
    fn from(page: Page<CommentListItem>) -> Self {
        Self {
            total_count: page.total_count,
            comments: page
                .items
                .into_iter()
                .map(|item| CommentItemResponse {
                    comment: item.comment.into(),
                    author: item.author.into(),
                })
                .collect(),
        }
    }
}

/// Response for POST /api/v1/posts/{id}/favorites
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: FavoriteId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.favorite_id,
            post_id: favorite.post_id,
            user_id: favorite.user_id,
            created_at: favorite.created_at,
        }
    }
}
