use axum::{
    Router,
    http::{HeaderValue, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{PostService, UserService};
use crate::state::SharedState;

mod assets;
mod error;
mod extractors;
mod observability;
pub mod posts;
pub mod users;
mod validation;
pub mod views;

pub use error::ApiError;
pub use extractors::HtmlForm;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn users(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }

    #[must_use]
    pub fn posts(&self) -> &Arc<dyn PostService> {
        &self.shared.post_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(&config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// 302 Found. Browsers re-issue the follow-up request as GET.
pub(crate) fn found(location: &'static str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, HeaderValue::from_static(location))],
    )
        .into_response()
}

async fn root() -> Response {
    found("/users")
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Page not found".to_string())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/create", get(users::create_user_form))
        .route("/users/{id}", post(users::update_user))
        .route("/users/{id}/edit", get(users::edit_user_form))
        .route("/users/{id}/delete", post(users::delete_user))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/create", get(posts::create_post_form))
        .route("/posts/{id}", post(posts::update_post))
        .route("/posts/{id}/edit", get(posts::edit_post_form))
        .route("/posts/{id}/delete", post(posts::delete_post))
        .route("/metrics", get(observability::get_metrics))
        .route("/static/{*path}", get(assets::serve_static))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state)
}
