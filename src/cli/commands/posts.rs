//! List posts command handler

use super::open_store;
use crate::config::Config;

pub async fn cmd_list_posts(config: &Config, user_id: Option<i32>) -> anyhow::Result<()> {
    let store = open_store(config).await?;

    let posts = match user_id {
        Some(id) => store.get_posts_by_user(id).await?,
        None => store.list_posts().await?,
    };

    if posts.is_empty() {
        match user_id {
            Some(id) => println!("User {id} has no posts."),
            None => println!("No posts."),
        }
        return Ok(());
    }

    println!("Posts ({} total)", posts.len());
    println!("{:-<70}", "");

    for post in posts {
        println!("{}", post.title);
        println!("  ID: {} | Author ID: {}", post.id, post.user_id);
    }

    Ok(())
}
