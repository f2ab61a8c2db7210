use axum::{
    body::Body,
    extract::Path,
    http::{StatusCode, header},
    response::IntoResponse,
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets"]
pub struct Asset;

/// Returns an embedded text file, e.g. the page layout.
pub fn text(path: &str) -> Option<String> {
    Asset::get(path).map(|file| String::from_utf8_lossy(&file.data).into_owned())
}

pub async fn serve_static(Path(path): Path<String>) -> impl IntoResponse {
    // The layout is a server-side template, not a public file.
    if path.ends_with(".html") {
        return (StatusCode::NOT_FOUND, "404 Not Found").into_response();
    }

    match Asset::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                Body::from(content.data),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}
