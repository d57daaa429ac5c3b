//! Fallback page for every other path (`/home`, `/vip/...`, `/admin/...`).
//!
//! Only reached when the access guard lets the request continue.

use axum::{http::StatusCode, http::Uri, response::IntoResponse};

pub async fn content(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "serving content page");
    (StatusCode::OK, format!("page: {}", uri.path()))
}
