//! Seed command handler

use super::open_store;
use crate::config::Config;

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    if store.seed_if_empty(&config.security).await? {
        println!("Example users and posts inserted.");
    } else {
        println!("Database already has users, nothing inserted.");
    }

    Ok(())
}
