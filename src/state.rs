use std::sync::Arc;

use crate::config::{Config, SecurityConfig};
use crate::db::Store;
use crate::services::{PostService, SeaOrmPostService, SeaOrmUserService, UserService};

#[derive(Clone)]
pub struct SharedState {
    pub store: Store,

    pub user_service: Arc<dyn UserService>,

    pub post_service: Arc<dyn PostService>,
}

impl SharedState {
    /// Opens the pool, applies migrations and seeds example data when enabled.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        if config.seed.enabled {
            store.seed_if_empty(&config.security).await?;
        }

        Ok(Self::with_store(store, config.security.clone()))
    }

    #[must_use]
    pub fn with_store(store: Store, security: SecurityConfig) -> Self {
        let user_service = Arc::new(SeaOrmUserService::new(store.clone(), security))
            as Arc<dyn UserService + Send + Sync + 'static>;

        let post_service = Arc::new(SeaOrmPostService::new(store.clone()))
            as Arc<dyn PostService + Send + Sync + 'static>;

        Self {
            store,
            user_service,
            post_service,
        }
    }
}
