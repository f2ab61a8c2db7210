//! Integration tests for the HTML pages and form endpoints.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use bloggr::config::Config;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app_with(seed: bool) -> (Arc<bloggr::api::AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("bloggr-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.seed.enabled = seed;
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;

    let state = bloggr::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = bloggr::api::router(state.clone());
    (state, router)
}

async fn spawn_app() -> (Arc<bloggr::api::AppState>, Router) {
    spawn_app_with(false).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Posts a form and returns the status plus the `Location` header, if any.
async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    (response.status(), location)
}

async fn create_user(app: &Router, username: &str, email: &str) {
    let form = format!("username={username}&email={email}&password=p");
    let (status, location) = post_form(app, "/users", &form).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/users"));
}

#[tokio::test]
async fn root_redirects_to_users() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/users");
}

#[tokio::test]
async fn created_user_shows_up_in_list() {
    let (_, app) = spawn_app().await;

    let (status, location) =
        post_form(&app, "/users", "username=alice&email=a%40x.com&password=p").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/users"));

    let (status, body) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("alice"));
    assert!(body.contains("a@x.com"));
    assert!(!body.contains("password"));
}

#[tokio::test]
async fn duplicate_user_still_redirects_and_keeps_original() {
    let (state, app) = spawn_app().await;
    create_user(&app, "alice", "a%40x.com").await;

    let (status, location) =
        post_form(&app, "/users", "username=alice&email=other%40x.com&password=p").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/users"));

    let users = state.store().list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "a@x.com");
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let (state, app) = spawn_app().await;

    let (status, _) = post_form(&app, "/users", "username=+&email=a%40x.com&password=p").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(state.store().list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn edit_user_updates_email() {
    let (state, app) = spawn_app().await;
    create_user(&app, "alice", "a%40x.com").await;
    let id = state.store().list_users().await.unwrap()[0].id;

    let (status, body) = get(&app, &format!("/users/{id}/edit")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="a@x.com""#));

    let (status, location) = post_form(&app, &format!("/users/{id}"), "email=new%40x.com").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/users"));

    let user = state.store().get_user(id).await.unwrap().unwrap();
    assert_eq!(user.email, "new@x.com");
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn missing_user_edit_page_is_not_found() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/users/999/edit").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("User 999 not found"));
}

#[tokio::test]
async fn mutations_on_missing_rows_redirect() {
    let (_, app) = spawn_app().await;

    let (status, location) = post_form(&app, "/posts/12345/delete", "").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/posts"));

    let (status, location) = post_form(&app, "/posts/12345", "content=x").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/posts"));

    let (status, location) = post_form(&app, "/users/12345/delete", "").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/users"));

    let (status, location) = post_form(&app, "/users/12345", "email=x%40x.com").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/users"));
}

#[tokio::test]
async fn post_lifecycle() {
    let (state, app) = spawn_app().await;
    create_user(&app, "alice", "a%40x.com").await;
    let owner = state.store().list_users().await.unwrap()[0].id;

    let (status, body) = get(&app, "/posts/create").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!(r#"<option value="{owner}">alice</option>"#)));

    let form = format!("title=Hello&content=First+post&user_id={owner}");
    let (status, location) = post_form(&app, "/posts", &form).await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/posts"));

    let (_, body) = get(&app, "/posts").await;
    assert!(body.contains("Hello"));
    assert!(body.contains("First post"));
    assert!(body.contains("alice"));

    let post = state.store().list_posts().await.unwrap().remove(0);
    let (status, _) = post_form(&app, &format!("/posts/{}", post.id), "content=Edited").await;
    assert_eq!(status, StatusCode::FOUND);

    let updated = state.store().get_post(post.id).await.unwrap().unwrap();
    assert_eq!(updated.content, "Edited");
    assert_eq!(updated.title, "Hello");
    assert_eq!(updated.user_id, owner);

    let (status, body) = get(&app, &format!("/posts/{}/edit", post.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Edited"));

    let (status, _) = post_form(&app, &format!("/posts/{}/delete", post.id), "").await;
    assert_eq!(status, StatusCode::FOUND);
    assert!(state.store().get_post(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn post_for_unknown_owner_is_dropped() {
    let (state, app) = spawn_app().await;

    for owner in ["77", "0", "-3"] {
        let form = format!("title=T&content=C&user_id={owner}");
        let (status, location) = post_form(&app, "/posts", &form).await;
        assert_eq!(status, StatusCode::FOUND, "user_id={owner}");
        assert_eq!(location.as_deref(), Some("/posts"));
    }
    assert!(state.store().list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_forms_render_error_page() {
    let (state, app) = spawn_app().await;

    for (uri, form) in [
        ("/posts", "title=T&content=C&user_id=abc"),
        ("/posts", "title=T&content=C"),
        ("/users", "username=alice&email=a%40x.com"),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri} {form}");
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&body).contains("Invalid input"));
    }

    assert!(state.store().list_users().await.unwrap().is_empty());
    assert!(state.store().list_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_user_removes_their_posts() {
    let (state, app) = spawn_app_with(true).await;

    let users = state.store().list_users().await.unwrap();
    let rusnik = users.iter().find(|u| u.username == "rusnik").unwrap().id;
    let andfom = users.iter().find(|u| u.username == "andfom").unwrap().id;

    let (status, location) = post_form(&app, &format!("/users/{rusnik}/delete"), "").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(location.as_deref(), Some("/users"));

    let posts = state.store().list_posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].user_id, andfom);

    let (_, body) = get(&app, "/users").await;
    assert!(!body.contains("rusnik"));
    assert!(body.contains("andfom"));
}

#[tokio::test]
async fn seeded_data_is_listed() {
    let (_, app) = spawn_app_with(true).await;

    let (_, body) = get(&app, "/users").await;
    for name in ["rusnik", "andfom", "olepak"] {
        assert!(body.contains(name), "missing {name}");
    }

    let (_, body) = get(&app, "/posts").await;
    for title in ["Post 1", "Post 2", "Post 3"] {
        assert!(body.contains(title), "missing {title}");
    }
}

#[tokio::test]
async fn stylesheet_is_served_and_layout_is_not() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/static/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

    let (status, _) = get(&app, "/static/layout.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_renders_not_found_page() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page not found"));
}
