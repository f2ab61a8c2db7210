//! Domain service for user management.
//!
//! Wraps the user repository so handlers get explicit `NotFound` results
//! instead of optional rows.

use crate::db::{BatchOutcome, NewUser, User};
use crate::domain::UserId;
use thiserror::Error;

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A user together with the number of posts it owns.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub user: User,
    pub post_count: i64,
}

/// Domain service trait for users.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Inserts every user it can. Duplicates are skipped and reported in the outcome.
    async fn create_users(&self, users: Vec<NewUser>) -> Result<BatchOutcome<User>, UserError>;

    /// Lists all users with their post counts, ordered by id.
    async fn list_users(&self) -> Result<Vec<UserSummary>, UserError>;

    /// Gets a single user.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if no user has this id.
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// Replaces a user's email.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if no user has this id, or
    /// [`UserError::Conflict`] if another user already uses the email.
    async fn update_email(&self, id: UserId, email: &str) -> Result<User, UserError>;

    /// Deletes a user and all of its posts, returning how many posts went with it.
    async fn delete_user(&self, id: UserId) -> Result<u64, UserError>;
}
