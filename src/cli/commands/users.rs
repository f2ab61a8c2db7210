//! List users command handler

use super::open_store;
use crate::config::Config;

pub async fn cmd_list_users(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users.");
        println!();
        println!("Insert example data with: bloggr seed");
        return Ok(());
    }

    let counts = store.post_counts_by_user().await?;

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        let posts = counts.get(&user.id).copied().unwrap_or(0);
        println!("{} <{}>", user.username, user.email);
        println!("  ID: {} | Posts: {}", user.id, posts);
    }

    Ok(())
}
