//! Create Comment Use Case

use std::sync::Arc;

use kernel::id::PostId;
use kernel::identity::CurrentUser;

use crate::domain::entities::{Comment, NewComment};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::value_objects::CommentBody;
use crate::error::{ContentError, ContentResult};

pub struct CreateCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    posts: Arc<P>,
    comments: Arc<C>,
}

impl<P, C> CreateCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(posts: Arc<P>, comments: Arc<C>) -> Self {
        Self { posts, comments }
    }

    pub async fn execute(
        &self,
        actor: &CurrentUser,
        post_id: PostId,
        body: CommentBody,
    ) -> ContentResult<Comment> {
        // Deleted posts take no new comments
        if self.posts.find_post(post_id).await?.is_none() {
            return Err(ContentError::PostNotFound);
        }

        let comment = self
            .comments
            .create_comment(&NewComment {
                post_id,
                user_id: actor.user_id,
                body,
            })
            .await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %post_id,
            "Comment created"
        );

        Ok(comment)
    }
}
