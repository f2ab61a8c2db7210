//! Domain service for posts.

use crate::db::{BatchOutcome, NewPost, Post, PostListing};
use crate::domain::{PostId, UserId};
use thiserror::Error;

/// Errors specific to post operations.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for PostError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PostError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for posts.
#[async_trait::async_trait]
pub trait PostService: Send + Sync {
    /// Inserts every post it can. Posts whose owner does not exist are skipped
    /// and reported in the outcome.
    async fn create_posts(&self, posts: Vec<NewPost>) -> Result<BatchOutcome<Post>, PostError>;

    /// Lists all posts with their author's username, ordered by id.
    async fn list_posts(&self) -> Result<Vec<PostListing>, PostError>;

    /// Gets a single post.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::NotFound`] if no post has this id.
    async fn get_post(&self, id: PostId) -> Result<Post, PostError>;

    /// Lists the posts owned by a user. An unknown user simply owns nothing.
    async fn posts_by_user(&self, user_id: UserId) -> Result<Vec<Post>, PostError>;

    /// Replaces a post's content; title and owner are left alone.
    async fn update_content(&self, id: PostId, content: &str) -> Result<Post, PostError>;

    /// Deletes a single post.
    async fn delete_post(&self, id: PostId) -> Result<(), PostError>;
}
