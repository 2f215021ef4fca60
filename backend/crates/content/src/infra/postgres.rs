//! PostgreSQL Repository Implementations
//!
//! Listing queries are assembled with [`QueryBuilder`]. A count query and
//! its page query push the same FROM/WHERE fragment, so `total_count`
//! always describes the rows the pages are cut from.

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{CommentId, FavoriteId, PostId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{
    Author, Comment, CommentListItem, Favorite, NewComment, NewPost, Post, PostView,
};
use crate::domain::repository::{
    CommentRepository, ContentQueryRepository, FavoriteRepository, PostRepository,
};
use crate::domain::value_objects::{Pagination, PostContent, PostFilter};
use crate::error::{ContentError, ContentResult};

/// PostgreSQL-backed content repository
#[derive(Clone)]
pub struct PgContentRepository {
    pool: PgPool,
}

impl PgContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Query fragments
// ============================================================================

const POST_COLUMNS: &str = r#"
    p.id, p.user_id, p.title, p.speaker, p.detail, p.movie_url, p.created_at, p.updated_at,
    u.name AS author_name,
    u.avatar_path AS author_avatar_path,
    (SELECT COUNT(*) FROM comments c
        WHERE c.post_id = p.id AND c.deleted_at IS NULL) AS comment_count,
    (SELECT COUNT(*) FROM favorites f WHERE f.post_id = p.id) AS favorite_count"#;

/// Live posts by live authors; callers append `AND ...` conditions
const LIVE_POSTS: &str = r#"
    FROM posts p
    JOIN users u ON u.id = p.user_id AND u.deleted_at IS NULL
    WHERE p.deleted_at IS NULL"#;

/// Favorites of one user on live posts by live authors; the user id bind follows
const USER_FAVORITES: &str = r#"
    FROM favorites fav
    JOIN posts p ON p.id = fav.post_id AND p.deleted_at IS NULL
    JOIN users u ON u.id = p.user_id AND u.deleted_at IS NULL
    WHERE fav.user_id = "#;

const COMMENT_COLUMNS: &str = r#"
    c.id, c.post_id, c.user_id, c.body, c.created_at, c.updated_at,
    u.name AS author_name,
    u.avatar_path AS author_avatar_path"#;

/// Live comments by live authors on a live post; the post id bind follows
const POST_COMMENTS: &str = r#"
    FROM comments c
    JOIN posts p ON p.id = c.post_id AND p.deleted_at IS NULL
    JOIN users u ON u.id = c.user_id AND u.deleted_at IS NULL
    WHERE c.deleted_at IS NULL AND c.post_id = "#;

/// Keyword matches any of three fields (parenthesized), ANDed with the author
fn push_post_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    if let Some(keyword) = &filter.keyword {
        // strpos is an exact substring test; LIKE would treat % and _ as wildcards
        builder.push(" AND (strpos(p.title, ");
        builder.push_bind(keyword.as_str().to_owned());
        builder.push(") > 0 OR strpos(p.speaker, ");
        builder.push_bind(keyword.as_str().to_owned());
        builder.push(") > 0 OR strpos(p.detail, ");
        builder.push_bind(keyword.as_str().to_owned());
        builder.push(") > 0)");
    }

    if let Some(author) = filter.author {
        builder.push(" AND p.user_id = ");
        builder.push_bind(author.get());
    }
}

fn push_viewer_flag(builder: &mut QueryBuilder<'_, Postgres>, viewer: Option<UserId>) {
    builder.push(", EXISTS (SELECT 1 FROM favorites vf WHERE vf.post_id = p.id AND vf.user_id = ");
    builder.push_bind(viewer.map(|id| id.get()));
    builder.push(") AS is_favorited");
}

fn push_page(builder: &mut QueryBuilder<'_, Postgres>, order_by: &str, pagination: Pagination) {
    builder.push(" ORDER BY ");
    builder.push(order_by);
    builder.push(" DESC LIMIT ");
    builder.push_bind(pagination.limit());
    builder.push(" OFFSET ");
    builder.push_bind(pagination.offset());
}

pub(crate) fn count_posts_query(filter: &PostFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*)");
    builder.push(LIVE_POSTS);
    push_post_filter(&mut builder, filter);
    builder
}

pub(crate) fn fetch_posts_query(
    filter: &PostFilter,
    viewer: Option<UserId>,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT");
    builder.push(POST_COLUMNS);
    push_viewer_flag(&mut builder, viewer);
    builder.push(LIVE_POSTS);
    push_post_filter(&mut builder, filter);
    push_page(&mut builder, "p.id", pagination);
    builder
}

pub(crate) fn fetch_post_query(
    post_id: PostId,
    viewer: Option<UserId>,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT");
    builder.push(POST_COLUMNS);
    push_viewer_flag(&mut builder, viewer);
    builder.push(LIVE_POSTS);
    builder.push(" AND p.id = ");
    builder.push_bind(post_id.get());
    builder
}

pub(crate) fn count_favorites_query(user_id: UserId) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*)");
    builder.push(USER_FAVORITES);
    builder.push_bind(user_id.get());
    builder
}

pub(crate) fn fetch_favorites_query(
    user_id: UserId,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT");
    builder.push(POST_COLUMNS);
    builder.push(", TRUE AS is_favorited");
    builder.push(USER_FAVORITES);
    builder.push_bind(user_id.get());
    push_page(&mut builder, "p.id", pagination);
    builder
}

pub(crate) fn count_comments_query(post_id: PostId) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*)");
    builder.push(POST_COMMENTS);
    builder.push_bind(post_id.get());
    builder
}

pub(crate) fn fetch_comments_query(
    post_id: PostId,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT");
    builder.push(COMMENT_COLUMNS);
    builder.push(POST_COMMENTS);
    builder.push_bind(post_id.get());
    push_page(&mut builder, "c.id", pagination);
    builder
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgContentRepository {
    async fn create_post(&self, post: &NewPost) -> ContentResult<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (user_id, title, speaker, detail, movie_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, speaker, detail, movie_url, created_at, updated_at
            "#,
        )
        .bind(post.user_id.get())
        .bind(post.content.title())
        .bind(post.content.speaker())
        .bind(post.content.detail())
        .bind(post.content.movie_url())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_post())
    }

    async fn find_post(&self, post_id: PostId) -> ContentResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.user_id, p.title, p.speaker, p.detail, p.movie_url,
                   p.created_at, p.updated_at
            FROM posts p
            JOIN users u ON u.id = p.user_id AND u.deleted_at IS NULL
            WHERE p.id = $1 AND p.deleted_at IS NULL
            "#,
        )
        .bind(post_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update_post(
        &self,
        post_id: PostId,
        content: &PostContent,
    ) -> ContentResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2, speaker = $3, detail = $4, movie_url = $5, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, user_id, title, speaker, detail, movie_url, created_at, updated_at
            "#,
        )
        .bind(post_id.get())
        .bind(content.title())
        .bind(content.speaker())
        .bind(content.detail())
        .bind(content.movie_url())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn soft_delete_post(&self, post_id: PostId) -> ContentResult<bool> {
        let result = sqlx::query(
            "UPDATE posts SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(post_id.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgContentRepository {
    async fn create_comment(&self, comment: &NewComment) -> ContentResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, user_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, body, created_at, updated_at
            "#,
        )
        .bind(comment.post_id.get())
        .bind(comment.user_id.get())
        .bind(comment.body.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn find_comment(&self, comment_id: CommentId) -> ContentResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, body, created_at, updated_at
            FROM comments
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(comment_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn soft_delete_comment(&self, comment_id: CommentId) -> ContentResult<bool> {
        let result = sqlx::query(
            "UPDATE comments SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(comment_id.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Favorite Repository Implementation
// ============================================================================

impl FavoriteRepository for PgContentRepository {
    async fn add_favorite(&self, user_id: UserId, post_id: PostId) -> ContentResult<Favorite> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            INSERT INTO favorites (user_id, post_id)
            VALUES ($1, $2)
            RETURNING id, user_id, post_id, created_at
            "#,
        )
        .bind(user_id.get())
        .bind(post_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // favorites_user_id_post_id_key
            if is_unique_violation(&e) {
                ContentError::AlreadyFavorited
            } else {
                ContentError::Database(e)
            }
        })?;

        Ok(row.into_favorite())
    }

    async fn remove_favorite(&self, user_id: UserId, post_id: PostId) -> ContentResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND post_id = $2")
            .bind(user_id.get())
            .bind(post_id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Content Query Repository Implementation
// ============================================================================

impl ContentQueryRepository for PgContentRepository {
    async fn count_posts(&self, filter: &PostFilter) -> ContentResult<i64> {
        let mut builder = count_posts_query(filter);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn fetch_posts(
        &self,
        filter: &PostFilter,
        viewer: Option<UserId>,
        pagination: Pagination,
    ) -> ContentResult<Vec<PostView>> {
        let mut builder = fetch_posts_query(filter, viewer, pagination);
        let rows = builder
            .build_query_as::<PostViewRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(PostViewRow::into_view).collect())
    }

    async fn fetch_post(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> ContentResult<Option<PostView>> {
        let mut builder = fetch_post_query(post_id, viewer);
        let row = builder
            .build_query_as::<PostViewRow>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(PostViewRow::into_view))
    }

    async fn count_comments(&self, post_id: PostId) -> ContentResult<i64> {
        let mut builder = count_comments_query(post_id);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn fetch_comments(
        &self,
        post_id: PostId,
        pagination: Pagination,
    ) -> ContentResult<Vec<CommentListItem>> {
        let mut builder = fetch_comments_query(post_id, pagination);
        let rows = builder
            .build_query_as::<CommentItemRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(CommentItemRow::into_item).collect())
    }

    async fn count_favorites(&self, user_id: UserId) -> ContentResult<i64> {
        let mut builder = count_favorites_query(user_id);
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn fetch_favorites(
        &self,
        user_id: UserId,
        pagination: Pagination,
    ) -> ContentResult<Vec<PostView>> {
        let mut builder = fetch_favorites_query(user_id, pagination);
        let rows = builder
            .build_query_as::<PostViewRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(PostViewRow::into_view).collect())
    }
}

// ============================================================================
// Database Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    title: String,
    speaker: String,
    detail: String,
    movie_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::new(self.id),
            user_id: UserId::new(self.user_id),
            title: self.title,
            speaker: self.speaker,
            detail: self.detail,
            movie_url: self.movie_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostViewRow {
    #[sqlx(flatten)]
    post: PostRow,
    author_name: String,
    author_avatar_path: Option<String>,
    comment_count: i64,
    favorite_count: i64,
    is_favorited: bool,
}

impl PostViewRow {
    fn into_view(self) -> PostView {
        let post = self.post.into_post();
        PostView {
            author: Author {
                user_id: post.user_id,
                name: self.author_name,
                avatar_path: self.author_avatar_path,
            },
            post,
            comment_count: self.comment_count,
            favorite_count: self.favorite_count,
            is_favorited: self.is_favorited,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::new(self.id),
            post_id: PostId::new(self.post_id),
            user_id: UserId::new(self.user_id),
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentItemRow {
    #[sqlx(flatten)]
    comment: CommentRow,
    author_name: String,
    author_avatar_path: Option<String>,
}

impl CommentItemRow {
    fn into_item(self) -> CommentListItem {
        let comment = self.comment.into_comment();
        CommentListItem {
            author: Author {
                user_id: comment.user_id,
                name: self.author_name,
                avatar_path: self.author_avatar_path,
            },
            comment,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: i64,
    user_id: i64,
    post_id: i64,
    created_at: DateTime<Utc>,
}

impl FavoriteRow {
    fn into_favorite(self) -> Favorite {
        Favorite {
            favorite_id: FavoriteId::new(self.id),
            user_id: UserId::new(self.user_id),
            post_id: PostId::new(self.post_id),
            created_at: self.created_at,
        }
    }
}
