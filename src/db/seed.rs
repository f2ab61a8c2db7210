//! Example data inserted into a fresh database.

use anyhow::Result;
use tracing::info;

use super::{NewPost, NewUser, Store};
use crate::config::SecurityConfig;

const EXAMPLE_USERS: [(&str, &str, &str); 3] = [
    ("rusnik", "rusnik@example.com", "password1"),
    ("andfom", "andfom@example.com", "password2"),
    ("olepak", "olepak@example.com", "password3"),
];

/// (title, content, index into `EXAMPLE_USERS`)
const EXAMPLE_POSTS: [(&str, &str, usize); 3] = [
    ("Post 1", "Content 1", 0),
    ("Post 2", "Content 2", 1),
    ("Post 3", "Content 3", 0),
];

impl Store {
    /// Seeds the example users and posts when the user table is empty.
    /// Returns whether anything was inserted.
    pub async fn seed_if_empty(&self, security: &SecurityConfig) -> Result<bool> {
        if self.user_count().await? > 0 {
            info!("Database already holds users, skipping seed data");
            return Ok(false);
        }

        let users: Vec<NewUser> = EXAMPLE_USERS
            .iter()
            .map(|(username, email, password)| NewUser {
                username: (*username).to_string(),
                email: (*email).to_string(),
                password: (*password).to_string(),
            })
            .collect();

        let outcome = self.add_users(&users, security).await?;

        // Owners are resolved by username so posts follow whatever ids the users received.
        let posts: Vec<NewPost> = EXAMPLE_POSTS
            .iter()
            .filter_map(|(title, content, owner)| {
                let username = EXAMPLE_USERS[*owner].0;
                let user = outcome.inserted.iter().find(|u| u.username == username)?;
                Some(NewPost {
                    title: (*title).to_string(),
                    content: (*content).to_string(),
                    user_id: user.id,
                })
            })
            .collect();

        let post_outcome = self.add_posts(&posts).await?;

        info!(
            "Seeded {} users and {} posts",
            outcome.inserted.len(),
            post_outcome.inserted.len()
        );
        Ok(true)
    }
}
