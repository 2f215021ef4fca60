//! Content Query Engine
//!
//! Paginated listings of posts, comments and favorites. Every listing runs
//! its count query and its page query concurrently and fails as a whole if
//! either fails. Post rows leave the engine with their embed link resolved.

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entities::{CommentListItem, PostListItem};
use crate::domain::repository::ContentQueryRepository;
use crate::domain::value_objects::{Page, Pagination, PostQuery};
use crate::error::{ContentError, ContentResult};

pub struct ContentQueryEngine<Q>
where
    Q: ContentQueryRepository,
{
    repo: Arc<Q>,
}

impl<Q> ContentQueryEngine<Q>
where
    Q: ContentQueryRepository,
{
    pub fn new(repo: Arc<Q>) -> Self {
        Self { repo }
    }

    /// Posts matching the filter, newest first
    pub async fn list_posts(&self, query: &PostQuery) -> ContentResult<Page<PostListItem>> {
        let (total_count, views) = tokio::try_join!(
            self.repo.count_posts(&query.filter),
            self.repo
                .fetch_posts(&query.filter, query.viewer, query.pagination),
        )?;

        tracing::debug!(
            total_count,
            returned = views.len(),
            page = query.pagination.page(),
            "Listed posts"
        );

        Ok(Page {
            total_count,
            items: views.into_iter().map(PostListItem::from).collect(),
        })
    }

    /// One post, annotated for the given viewer
    pub async fn get_post(
        &self,
        post_id: PostId,
        viewer: Option<UserId>,
    ) -> ContentResult<PostListItem> {
        self.repo
            .fetch_post(post_id, viewer)
            .await?
            .map(PostListItem::from)
            .ok_or(ContentError::PostNotFound)
    }

    /// Comments on a post, newest first
    pub async fn list_comments(
        &self,
        post_id: PostId,
        pagination: Pagination,
    ) -> ContentResult<Page<CommentListItem>> {
        let (total_count, items) = tokio::try_join!(
            self.repo.count_comments(post_id),
            self.repo.fetch_comments(post_id, pagination),
        )?;

        Ok(Page { total_count, items })
    }

    /// Posts the user has favorited, newest post first
    pub async fn list_favorites(
        &self,
        user_id: UserId,
        pagination: Pagination,
    ) -> ContentResult<Page<PostListItem>> {
        let (total_count, views) = tokio::try_join!(
            self.repo.count_favorites(user_id),
            self.repo.fetch_favorites(user_id, pagination),
        )?;

        Ok(Page {
            total_count,
            items: views.into_iter().map(PostListItem::from).collect(),
        })
    }
}
