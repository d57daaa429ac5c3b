/*
 * Responsibility
 * - GET /login (redirect 先)
 * - 認証そのものは identity provider 側。ここは placeholder
 */
use axum::{http::StatusCode, response::IntoResponse};

pub async fn login() -> impl IntoResponse {
    (StatusCode::OK, "login")
}
