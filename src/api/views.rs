//! Server-rendered HTML pages.
//!
//! Each page builds its body and hands it to [`page`], which fills the
//! embedded `layout.html`. All user data passes through `html_escape`.

use axum::response::Html;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use super::assets;
use crate::db::{Post, PostListing, User};
use crate::services::UserSummary;

const FALLBACK_LAYOUT: &str =
    "<!DOCTYPE html><html><head><title>{{title}}</title></head><body><h1>{{title}}</h1>{{content}}</body></html>";

/// Wraps `content` in the site layout. `content` must already be escaped.
#[must_use]
pub fn page(title: &str, content: &str) -> Html<String> {
    let layout = assets::text("layout.html").unwrap_or_else(|| FALLBACK_LAYOUT.to_string());
    Html(
        layout
            .replace("{{title}}", &text(title))
            .replace("{{content}}", content),
    )
}

pub fn users_list(users: &[UserSummary]) -> Html<String> {
    let mut body = String::from(r#"<p><a href="/users/create">New user</a></p>"#);

    if users.is_empty() {
        body.push_str(r#"<p class="muted">No users yet.</p>"#);
        return page("Users", &body);
    }

    body.push_str(
        "<table><thead><tr><th>ID</th><th>Username</th><th>Email</th><th>Posts</th><th></th></tr></thead><tbody>",
    );
    for summary in users {
        let user = &summary.user;
        let _ = write!(
            body,
            r#"<tr><td>{id}</td><td>{username}</td><td>{email}</td><td>{count}</td><td><a href="/users/{id}/edit">Edit</a> <form class="inline" method="post" action="/users/{id}/delete"><button type="submit">Delete</button></form></td></tr>"#,
            id = user.id,
            username = text(&user.username),
            email = text(&user.email),
            count = summary.post_count,
        );
    }
    body.push_str("</tbody></table>");

    page("Users", &body)
}

pub fn user_create_form() -> Html<String> {
    let body = r#"<form method="post" action="/users">
<label>Username <input name="username" required></label>
<label>Email <input name="email" type="email" required></label>
<label>Password <input name="password" type="password" required></label>
<button type="submit">Create</button>
</form>"#;

    page("New user", body)
}

pub fn user_edit_form(user: &User, posts: &[Post]) -> Html<String> {
    let mut body = String::new();
    let _ = write!(
        body,
        r#"<p class="muted">{username}</p>
<form method="post" action="/users/{id}">
<label>Email <input name="email" type="email" value="{email}" required></label>
<button type="submit">Save</button>
</form>
<h2>Posts</h2>"#,
        id = user.id,
        username = text(&user.username),
        email = attr(&user.email),
    );

    if posts.is_empty() {
        body.push_str(r#"<p class="muted">This user has no posts.</p>"#);
    } else {
        body.push_str("<ul>");
        for post in posts {
            let _ = write!(
                body,
                r#"<li><a href="/posts/{id}/edit">{title}</a></li>"#,
                id = post.id,
                title = text(&post.title),
            );
        }
        body.push_str("</ul>");
    }

    page("Edit user", &body)
}

pub fn posts_list(posts: &[PostListing]) -> Html<String> {
    let mut body = String::from(r#"<p><a href="/posts/create">New post</a></p>"#);

    if posts.is_empty() {
        body.push_str(r#"<p class="muted">No posts yet.</p>"#);
        return page("Posts", &body);
    }

    body.push_str(
        "<table><thead><tr><th>ID</th><th>Title</th><th>Content</th><th>Author</th><th></th></tr></thead><tbody>",
    );
    for listing in posts {
        let post = &listing.post;
        let _ = write!(
            body,
            r#"<tr><td>{id}</td><td>{title}</td><td>{content}</td><td>{author}</td><td><a href="/posts/{id}/edit">Edit</a> <form class="inline" method="post" action="/posts/{id}/delete"><button type="submit">Delete</button></form></td></tr>"#,
            id = post.id,
            title = text(&post.title),
            content = text(&post.content),
            author = text(listing.author.as_deref().unwrap_or("unknown")),
        );
    }
    body.push_str("</tbody></table>");

    page("Posts", &body)
}

pub fn post_create_form(users: &[User]) -> Html<String> {
    if users.is_empty() {
        return page(
            "New post",
            r#"<p class="muted">Create a <a href="/users/create">user</a> first.</p>"#,
        );
    }

    let mut options = String::new();
    for user in users {
        let _ = write!(
            options,
            r#"<option value="{id}">{username}</option>"#,
            id = user.id,
            username = text(&user.username),
        );
    }

    let body = format!(
        r#"<form method="post" action="/posts">
<label>Title <input name="title" required></label>
<label>Content <textarea name="content" required></textarea></label>
<label>Author <select name="user_id">{options}</select></label>
<button type="submit">Create</button>
</form>"#
    );

    page("New post", &body)
}

pub fn post_edit_form(post: &Post) -> Html<String> {
    let body = format!(
        r#"<p class="muted">{title}</p>
<form method="post" action="/posts/{id}">
<label>Content <textarea name="content" required>{content}</textarea></label>
<button type="submit">Save</button>
</form>"#,
        id = post.id,
        title = text(&post.title),
        content = text(&post.content),
    );

    page("Edit post", &body)
}

pub fn error_page(title: &str, message: &str) -> Html<String> {
    let body = format!(
        r#"<p>{}</p><p><a href="/users">Back to users</a></p>"#,
        text(message)
    );
    page(title, &body)
}
