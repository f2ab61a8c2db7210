use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tokio::task;
use tracing::{info, warn};

use super::{BatchOutcome, RejectReason, Rejection, integrity_violation};
use crate::config::SecurityConfig;
use crate::entities::{posts, prelude::*, users};

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
        }
    }
}

/// Input for a user insert. The password is hashed before it reaches the database.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts each user on its own. A duplicate username or email skips that
    /// record and the rest of the batch still goes in.
    pub async fn add_many(
        &self,
        batch: &[NewUser],
        security: &SecurityConfig,
    ) -> Result<BatchOutcome<User>> {
        let mut outcome = BatchOutcome::default();

        for (index, new_user) in batch.iter().enumerate() {
            let password = new_user.password.clone();
            let config = security.clone();
            let password_hash = task::spawn_blocking(move || hash_password(&password, &config))
                .await
                .context("Password hashing task panicked")??;

            let active = users::ActiveModel {
                username: Set(new_user.username.clone()),
                email: Set(new_user.email.clone()),
                password_hash: Set(password_hash),
                ..Default::default()
            };

            match active.insert(&self.conn).await {
                Ok(model) => {
                    info!("User '{}' added with ID {}", model.username, model.id);
                    outcome.inserted.push(User::from(model));
                }
                Err(err) => match integrity_violation(&err) {
                    Some(RejectReason::Duplicate) => {
                        warn!("Skipping user '{}': {}", new_user.username, err);
                        outcome.rejected.push(Rejection {
                            index,
                            label: new_user.username.clone(),
                            reason: RejectReason::Duplicate,
                        });
                    }
                    _ => {
                        return Err(err).with_context(|| {
                            format!("Failed to insert user '{}'", new_user.username)
                        });
                    }
                },
            }
        }

        Ok(outcome)
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        let rows = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list users")?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<User>> {
        let user = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")?;

        Ok(count)
    }

    /// Returns `None` when no user has this id; nothing is written in that case.
    pub async fn update_email(&self, id: i32, email: &str) -> Result<Option<User>> {
        let Some(user) = Users::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for email update")?
        else {
            return Ok(None);
        };

        let mut active: users::ActiveModel = user.into();
        active.email = Set(email.to_string());
        let updated = active.update(&self.conn).await?;

        info!("Email of user {} updated", id);
        Ok(Some(User::from(updated)))
    }

    /// Deletes the user and every post it owns in one transaction.
    /// Returns `None` when the user does not exist, otherwise the number of posts removed.
    pub async fn remove_with_posts(&self, id: i32) -> Result<Option<u64>> {
        let txn = self.conn.begin().await?;

        if Users::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(None);
        }

        let posts_removed = Posts::delete_many()
            .filter(posts::Column::UserId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        Users::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!("Removed user {} and {} of their posts", id, posts_removed);
        Ok(Some(posts_removed))
    }

    /// Verify password for a user
    /// Note: This uses `spawn_blocking` because Argon2 hashing is CPU-intensive
    /// and would block the async runtime if run directly.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        let user = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let Some(user) = user else {
            return Ok(false);
        };

        let password_hash = user.password_hash;
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_params() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    #[test]
    fn hash_password_produces_argon2id_phc_string() {
        let hash = hash_password("password1", &cheap_params()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("password1"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"password1", &parsed)
                .is_ok()
        );
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn hash_password_salts_every_call() {
        let first = hash_password("same", &cheap_params()).unwrap();
        let second = hash_password("same", &cheap_params()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn hash_password_rejects_invalid_params() {
        let config = SecurityConfig {
            argon2_time_cost: 0,
            ..cheap_params()
        };
        assert!(hash_password("x", &config).is_err());
    }
}
