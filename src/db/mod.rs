use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;

pub mod migrator;
pub mod repositories;
pub mod seed;

pub use repositories::post::{NewPost, Post, PostListing};
pub use repositories::user::{NewUser, User};
pub use repositories::{BatchOutcome, RejectReason, Rejection};

/// Handle to the connection pool. Every call borrows a pooled connection for
/// the duration of that call only.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn post_repo(&self) -> repositories::post::PostRepository {
        repositories::post::PostRepository::new(self.conn.clone())
    }

    // Users

    pub async fn add_users(
        &self,
        users: &[NewUser],
        security: &SecurityConfig,
    ) -> Result<BatchOutcome<User>> {
        self.user_repo().add_many(users, security).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get(id).await
    }

    pub async fn user_count(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    pub async fn update_user_email(&self, id: i32, email: &str) -> Result<Option<User>> {
        self.user_repo().update_email(id, email).await
    }

    pub async fn remove_user_with_posts(&self, id: i32) -> Result<Option<u64>> {
        self.user_repo().remove_with_posts(id).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    // Posts

    pub async fn add_posts(&self, posts: &[NewPost]) -> Result<BatchOutcome<Post>> {
        self.post_repo().add_many(posts).await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.post_repo().list_all().await
    }

    pub async fn list_posts_with_authors(&self) -> Result<Vec<PostListing>> {
        self.post_repo().list_with_authors().await
    }

    pub async fn get_post(&self, id: i32) -> Result<Option<Post>> {
        self.post_repo().get(id).await
    }

    pub async fn get_posts_by_user(&self, user_id: i32) -> Result<Vec<Post>> {
        self.post_repo().get_by_owner(user_id).await
    }

    pub async fn post_counts_by_user(&self) -> Result<HashMap<i32, i64>> {
        self.post_repo().counts_by_owner().await
    }

    pub async fn update_post_content(&self, id: i32, content: &str) -> Result<Option<Post>> {
        self.post_repo().update_content(id, content).await
    }

    pub async fn remove_post(&self, id: i32) -> Result<bool> {
        self.post_repo().remove(id).await
    }
}
