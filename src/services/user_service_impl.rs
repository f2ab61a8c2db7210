//! `SeaORM` implementation of the `UserService` trait.

use crate::config::SecurityConfig;
use crate::db::repositories::integrity_violation;
use crate::db::{BatchOutcome, NewUser, Store, User};
use crate::domain::UserId;
use crate::services::user_service::{UserError, UserService, UserSummary};
use async_trait::async_trait;

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn create_users(&self, users: Vec<NewUser>) -> Result<BatchOutcome<User>, UserError> {
        let outcome = self.store.add_users(&users, &self.security).await?;
        Ok(outcome)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, UserError> {
        let users = self.store.list_users().await?;
        let counts = self.store.post_counts_by_user().await?;

        Ok(users
            .into_iter()
            .map(|user| UserSummary {
                post_count: counts.get(&user.id).copied().unwrap_or(0),
                user,
            })
            .collect())
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.store
            .get_user(id.value())
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn update_email(&self, id: UserId, email: &str) -> Result<User, UserError> {
        let updated = self
            .store
            .update_user_email(id.value(), email)
            .await
            .map_err(|err| {
                if err
                    .downcast_ref::<sea_orm::DbErr>()
                    .and_then(integrity_violation)
                    .is_some()
                {
                    UserError::Conflict(format!("Email '{email}' is already in use"))
                } else {
                    UserError::from(err)
                }
            })?;

        updated.ok_or(UserError::NotFound(id))
    }

    async fn delete_user(&self, id: UserId) -> Result<u64, UserError> {
        self.store
            .remove_user_with_posts(id.value())
            .await?
            .ok_or(UserError::NotFound(id))
    }
}
