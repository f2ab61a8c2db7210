use axum::{
    extract::{Path, State},
    response::{Html, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, AppState, found, views};
use crate::api::extractors::HtmlForm;
use crate::api::validation::{require_field, require_raw_field};
use crate::db::{NewPost, User};
use crate::domain::{PostId, UserId};
use crate::services::PostError;

#[derive(Debug, Deserialize)]
pub struct CreatePostForm {
    pub title: String,
    pub content: String,
    pub user_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostForm {
    pub content: String,
}

/// `GET /posts`
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let posts = state.posts().list_posts().await?;
    Ok(views::posts_list(&posts))
}

/// `GET /posts/create`
///
/// The form offers every user as a possible author.
pub async fn create_post_form(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    let users: Vec<User> = state
        .users()
        .list_users()
        .await?
        .into_iter()
        .map(|summary| summary.user)
        .collect();
    Ok(views::post_create_form(&users))
}

/// `POST /posts`
///
/// Any integer is accepted as the author. An unknown one is rejected by the
/// store, logged, and the browser is still sent back to the list.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    HtmlForm(form): HtmlForm<CreatePostForm>,
) -> Result<Response, ApiError> {
    let post = NewPost {
        title: require_field("Title", &form.title)?,
        content: require_raw_field("Content", &form.content)?,
        user_id: form.user_id.value(),
    };

    state.posts().create_posts(vec![post]).await?;
    Ok(found("/posts"))
}

/// `GET /posts/{id}/edit`
pub async fn edit_post_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PostId>,
) -> Result<Html<String>, ApiError> {
    let post = state.posts().get_post(id).await?;
    Ok(views::post_edit_form(&post))
}

/// `POST /posts/{id}`
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PostId>,
    HtmlForm(form): HtmlForm<UpdatePostForm>,
) -> Result<Response, ApiError> {
    let content = require_raw_field("Content", &form.content)?;

    match state.posts().update_content(id, &content).await {
        Ok(_) => {}
        Err(PostError::NotFound(id)) => warn!("Post {} not found, content left unchanged", id),
        Err(err) => return Err(err.into()),
    }

    Ok(found("/posts"))
}

/// `POST /posts/{id}/delete`
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PostId>,
) -> Result<Response, ApiError> {
    match state.posts().delete_post(id).await {
        Ok(()) => {}
        Err(PostError::NotFound(id)) => warn!("Post {} not found, nothing deleted", id),
        Err(err) => return Err(err.into()),
    }

    Ok(found("/posts"))
}
