//! Delete Post Use Case
//!
//! Soft-deletes a post. Its comments and favorites stay stored but stop
//! showing up, since every listing joins on live posts.

use std::sync::Arc;

use kernel::id::PostId;
use kernel::identity::CurrentUser;

use crate::domain::repository::PostRepository;
use crate::error::{ContentError, ContentResult};

pub struct DeletePostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> DeletePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, actor: &CurrentUser, post_id: PostId) -> ContentResult<()> {
        let post = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        if !post.is_owned_by(actor.user_id) {
            return Err(ContentError::Forbidden);
        }

        if !self.posts.soft_delete_post(post_id).await? {
            return Err(ContentError::PostNotFound);
        }

        tracing::info!(post_id = %post_id, "Post deleted");

        Ok(())
    }
}
