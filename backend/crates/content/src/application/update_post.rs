//! Update Post Use Case
//!
//! Only the owner may edit a post.

use std::sync::Arc;

use kernel::id::PostId;
use kernel::identity::CurrentUser;

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::PostContent;
use crate::error::{ContentError, ContentResult};

pub struct UpdatePostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> UpdatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(
        &self,
        actor: &CurrentUser,
        post_id: PostId,
        content: PostContent,
    ) -> ContentResult<Post> {
        let post = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        if !post.is_owned_by(actor.user_id) {
            return Err(ContentError::Forbidden);
        }

        let updated = self
            .posts
            .update_post(post_id, &content)
            .await?
            .ok_or(ContentError::PostNotFound)?;

        tracing::info!(post_id = %post_id, "Post updated");

        Ok(updated)
    }
}
