//! Add Favorite Use Case

use std::sync::Arc;

use kernel::id::PostId;
use kernel::identity::CurrentUser;

use crate::domain::entities::Favorite;
use crate::domain::repository::{FavoriteRepository, PostRepository};
use crate::error::{ContentError, ContentResult};

pub struct AddFavoriteUseCase<P, F>
where
    P: PostRepository,
    F: FavoriteRepository,
{
    posts: Arc<P>,
    favorites: Arc<F>,
}

impl<P, F> AddFavoriteUseCase<P, F>
where
    P: PostRepository,
    F: FavoriteRepository,
{
    pub fn new(posts: Arc<P>, favorites: Arc<F>) -> Self {
        Self { posts, favorites }
    }

    /// A second favorite for the same post fails with `AlreadyFavorited`;
    /// the storage unique constraint decides, not this check.
    pub async fn execute(&self, actor: &CurrentUser, post_id: PostId) -> ContentResult<Favorite> {
        if self.posts.find_post(post_id).await?.is_none() {
            return Err(ContentError::PostNotFound);
        }

        let favorite = self.favorites.add_favorite(actor.user_id, post_id).await?;

        tracing::info!(post_id = %post_id, user_id = %actor.user_id, "Favorite added");

        Ok(favorite)
    }
}
