mod posts;
mod seed;
mod users;

pub use posts::cmd_list_posts;
pub use seed::cmd_seed;
pub use users::cmd_list_users;

use crate::config::Config;
use crate::db::Store;

async fn open_store(config: &Config) -> anyhow::Result<Store> {
    Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await
}
