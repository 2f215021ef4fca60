//! Remove Favorite Use Case

use std::sync::Arc;

use kernel::id::PostId;
use kernel::identity::CurrentUser;

use crate::domain::repository::FavoriteRepository;
use crate::error::{ContentError, ContentResult};

pub struct RemoveFavoriteUseCase<F>
where
    F: FavoriteRepository,
{
    favorites: Arc<F>,
}

impl<F> RemoveFavoriteUseCase<F>
where
    F: FavoriteRepository,
{
    pub fn new(favorites: Arc<F>) -> Self {
        Self { favorites }
    }

    pub async fn execute(&self, actor: &CurrentUser, post_id: PostId) -> ContentResult<()> {
        if !self.favorites.remove_favorite(actor.user_id, post_id).await? {
            return Err(ContentError::FavoriteNotFound);
        }

        tracing::info!(post_id = %post_id, user_id = %actor.user_id, "Favorite removed");

        Ok(())
    }
}
