//! Create Post Use Case

use std::sync::Arc;

use kernel::identity::CurrentUser;

use crate::domain::entities::{NewPost, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::PostContent;
use crate::error::ContentResult;

pub struct CreatePostUseCase<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
}

impl<P> CreatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, actor: &CurrentUser, content: PostContent) -> ContentResult<Post> {
        let post = self
            .posts
            .create_post(&NewPost {
                user_id: actor.user_id,
                content,
            })
            .await?;

        tracing::info!(post_id = %post.post_id, user_id = %actor.user_id, "Post created");

        Ok(post)
    }
}
