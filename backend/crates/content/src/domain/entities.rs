//! Domain Entities
//!
//! Stored rows (posts, comments, favorites) and the read-side projections
//! the query engine returns.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, FavoriteId, PostId, UserId};

use crate::domain::services::embed_url;
use crate::domain::value_objects::{CommentBody, PostContent};

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub speaker: String,
    pub detail: String,
    /// Raw link as the author typed it
    pub movie_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Post to be inserted
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: UserId,
    pub content: PostContent,
}

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_written_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Comment to be inserted
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub body: CommentBody,
}

/// Favorite entity; at most one per (user, post)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Favorite {
    pub favorite_id: FavoriteId,
    pub user_id: UserId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Projections
// ============================================================================

/// Display fields of the user who wrote a post or comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub user_id: UserId,
    pub name: String,
    pub avatar_path: Option<String>,
}

/// Post row with aggregates, as the storage layer returns it
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub author: Author,
    /// Live comments by live authors
    pub comment_count: i64,
    pub favorite_count: i64,
    /// Whether the viewer has favorited the post; false without a viewer
    pub is_favorited: bool,
}

/// Post as served to clients: [`PostView`] plus the embeddable video link
#[derive(Debug, Clone)]
pub struct PostListItem {
    pub post: Post,
    pub author: Author,
    pub comment_count: i64,
    pub favorite_count: i64,
    pub is_favorited: bool,
    /// Empty when the movie URL is not a recognizable video link
    pub embed_movie_url: String,
}

impl From<PostView> for PostListItem {
    fn from(view: PostView) -> Self {
        let embed_movie_url = embed_url(&view.post.movie_url);
        Self {
            post: view.post,
            author: view.author,
            comment_count: view.comment_count,
            favorite_count: view.favorite_count,
            is_favorited: view.is_favorited,
            embed_movie_url,
        }
    }
}

/// Comment with its author's display fields
#[derive(Debug, Clone)]
pub struct CommentListItem {
    pub comment: Comment,
    pub author: Author,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(movie_url: &str) -> PostView {
        let now = Utc::now();
        PostView {
            post: Post {
                post_id: PostId::new(1),
                user_id: UserId::new(7),
                title: "t".into(),
                speaker: "s".into(),
                detail: String::new(),
                movie_url: movie_url.into(),
                created_at: now,
                updated_at: now,
            },
            author: Author {
                user_id: UserId::new(7),
                name: "alice".into(),
                avatar_path: None,
            },
            comment_count: 2,
            favorite_count: 1,
            is_favorited: true,
        }
    }

    #[test]
    fn test_list_item_carries_embed_url() {
        let item = PostListItem::from(view("https://youtu.be/A1"));
        assert_eq!(item.embed_movie_url, "https://www.youtube.com/embed/A1");
        assert_eq!(item.post.movie_url, "https://youtu.be/A1");
        assert_eq!(item.comment_count, 2);
        assert!(item.is_favorited);
    }

    #[test]
    fn test_list_item_without_video() {
        let item = PostListItem::from(view(""));
        assert!(item.embed_movie_url.is_empty());
    }

    #[test]
    fn test_ownership() {
        let post = view("").post;
        assert!(post.is_owned_by(UserId::new(7)));
        assert!(!post.is_owned_by(UserId::new(8)));
    }
}
