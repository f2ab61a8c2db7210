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
use crate::db::NewUser;
use crate::domain::UserId;
use crate::services::UserError;

#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    pub email: String,
}

/// `GET /users`
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let users = state.users().list_users().await?;
    Ok(views::users_list(&users))
}

/// `GET /users/create`
pub async fn create_user_form() -> Html<String> {
    views::user_create_form()
}

/// `POST /users`
///
/// A duplicate username or email is logged by the store and the browser is
/// still sent back to the list.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    HtmlForm(form): HtmlForm<CreateUserForm>,
) -> Result<Response, ApiError> {
    let user = NewUser {
        username: require_field("Username", &form.username)?,
        email: require_field("Email", &form.email)?,
        password: require_raw_field("Password", &form.password)?,
    };

    state.users().create_users(vec![user]).await?;
    Ok(found("/users"))
}

/// `GET /users/{id}/edit`
pub async fn edit_user_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
) -> Result<Html<String>, ApiError> {
    let user = state.users().get_user(id).await?;
    let posts = state.posts().posts_by_user(id).await?;
    Ok(views::user_edit_form(&user, &posts))
}

/// `POST /users/{id}`
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
    HtmlForm(form): HtmlForm<UpdateUserForm>,
) -> Result<Response, ApiError> {
    let email = require_field("Email", &form.email)?;

    match state.users().update_email(id, &email).await {
        Ok(_) => {}
        Err(UserError::NotFound(id)) => warn!("User {} not found, email left unchanged", id),
        Err(err) => return Err(err.into()),
    }

    Ok(found("/users"))
}

/// `POST /users/{id}/delete`
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<UserId>,
) -> Result<Response, ApiError> {
    match state.users().delete_user(id).await {
        Ok(_) => {}
        Err(UserError::NotFound(id)) => warn!("User {} not found, nothing deleted", id),
        Err(err) => return Err(err.into()),
    }

    Ok(found("/users"))
}
