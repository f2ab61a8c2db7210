//! `SeaORM` implementation of the `PostService` trait.

use crate::db::{BatchOutcome, NewPost, Post, PostListing, Store};
use crate::domain::{PostId, UserId};
use crate::services::post_service::{PostError, PostService};
use async_trait::async_trait;

pub struct SeaOrmPostService {
    store: Store,
}

impl SeaOrmPostService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostService for SeaOrmPostService {
    async fn create_posts(&self, posts: Vec<NewPost>) -> Result<BatchOutcome<Post>, PostError> {
        let outcome = self.store.add_posts(&posts).await?;
        Ok(outcome)
    }

    async fn list_posts(&self) -> Result<Vec<PostListing>, PostError> {
        let posts = self.store.list_posts_with_authors().await?;
        Ok(posts)
    }

    async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.store
            .get_post(id.value())
            .await?
            .ok_or(PostError::NotFound(id))
    }

    async fn posts_by_user(&self, user_id: UserId) -> Result<Vec<Post>, PostError> {
        let posts = self.store.get_posts_by_user(user_id.value()).await?;
        Ok(posts)
    }

    async fn update_content(&self, id: PostId, content: &str) -> Result<Post, PostError> {
        self.store
            .update_post_content(id.value(), content)
            .await?
            .ok_or(PostError::NotFound(id))
    }

    async fn delete_post(&self, id: PostId) -> Result<(), PostError> {
        if self.store.remove_post(id.value()).await? {
            Ok(())
        } else {
            Err(PostError::NotFound(id))
        }
    }
}
