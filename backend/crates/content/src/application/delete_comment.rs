//! Delete Comment Use Case
//!
//! Only the comment's author may delete it.

use std::sync::Arc;

use kernel::id::CommentId;
use kernel::identity::CurrentUser;

use crate::domain::repository::CommentRepository;
use crate::error::{ContentError, ContentResult};

pub struct DeleteCommentUseCase<C>
where
    C: CommentRepository,
{
    comments: Arc<C>,
}

impl<C> DeleteCommentUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comments: Arc<C>) -> Self {
        Self { comments }
    }

    pub async fn execute(&self, actor: &CurrentUser, comment_id: CommentId) -> ContentResult<()> {
        let comment = self
            .comments
            .find_comment(comment_id)
            .await?
            .ok_or(ContentError::CommentNotFound)?;

        if !comment.is_written_by(actor.user_id) {
            return Err(ContentError::Forbidden);
        }

        if !self.comments.soft_delete_comment(comment_id).await? {
            return Err(ContentError::CommentNotFound);
        }

        tracing::info!(comment_id = %comment_id, "Comment deleted");

        Ok(())
    }
}
