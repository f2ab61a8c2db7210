use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::HashMap;
use tracing::{info, warn};

use super::{BatchOutcome, Rejection, integrity_violation};
use crate::entities::{posts, prelude::*, users};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

impl From<posts::Model> for Post {
    fn from(model: posts::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            user_id: model.user_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

/// A post joined with its author's username for listings.
#[derive(Debug, Clone)]
pub struct PostListing {
    pub post: Post,
    pub author: Option<String>,
}

/// Repository for post operations
pub struct PostRepository {
    conn: DatabaseConnection,
}

impl PostRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts each post on its own. Integrity violations (unknown owner) skip
    /// that record; any other failure aborts the rest of the batch.
    pub async fn add_many(&self, batch: &[NewPost]) -> Result<BatchOutcome<Post>> {
        let mut outcome = BatchOutcome::default();

        for (index, new_post) in batch.iter().enumerate() {
            let active = posts::ActiveModel {
                title: Set(new_post.title.clone()),
                content: Set(new_post.content.clone()),
                user_id: Set(new_post.user_id),
                ..Default::default()
            };

            match active.insert(&self.conn).await {
                Ok(model) => {
                    info!("Post '{}' added with ID {}", model.title, model.id);
                    outcome.inserted.push(Post::from(model));
                }
                Err(err) => {
                    let Some(reason) = integrity_violation(&err) else {
                        return Err(err).with_context(|| {
                            format!("Failed to insert post '{}'", new_post.title)
                        });
                    };
                    warn!(
                        "Skipping post '{}' ({}): {}",
                        new_post.title,
                        reason.as_str(),
                        err
                    );
                    outcome.rejected.push(Rejection {
                        index,
                        label: new_post.title.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(outcome)
    }

    pub async fn list_all(&self) -> Result<Vec<Post>> {
        let rows = Posts::find()
            .order_by_asc(posts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list posts")?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    pub async fn list_with_authors(&self) -> Result<Vec<PostListing>> {
        let rows = Posts::find()
            .find_also_related(Users)
            .order_by_asc(posts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list posts with authors")?;

        Ok(rows
            .into_iter()
            .map(|(post, author)| PostListing {
                post: Post::from(post),
                author: author.map(|u: users::Model| u.username),
            })
            .collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Post>> {
        let post = Posts::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query post by ID")?;

        Ok(post.map(Post::from))
    }

    pub async fn get_by_owner(&self, user_id: i32) -> Result<Vec<Post>> {
        let rows = Posts::find()
            .filter(posts::Column::UserId.eq(user_id))
            .order_by_asc(posts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query posts by owner")?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Post counts keyed by owner id. Users without posts are absent from the map.
    pub async fn counts_by_owner(&self) -> Result<HashMap<i32, i64>> {
        let results: Vec<(i32, i64)> = Posts::find()
            .select_only()
            .column(posts::Column::UserId)
            .column_as(posts::Column::Id.count(), "count")
            .group_by(posts::Column::UserId)
            .into_tuple()
            .all(&self.conn)
            .await
            .context("Failed to count posts per owner")?;

        Ok(results.into_iter().collect())
    }

    /// Returns `None` when no post has this id; nothing is written in that case.
    pub async fn update_content(&self, id: i32, content: &str) -> Result<Option<Post>> {
        let Some(post) = Posts::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query post for content update")?
        else {
            return Ok(None);
        };

        let mut active: posts::ActiveModel = post.into();
        active.content = Set(content.to_string());
        let updated = active.update(&self.conn).await?;

        info!("Content of post {} updated", id);
        Ok(Some(Post::from(updated)))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Posts::delete_by_id(id).exec(&self.conn).await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed post with ID: {}", id);
        }
        Ok(removed)
    }
}
