/*
 * Responsibility
 * - URL 構造を定義 (/health, /login, fallback)
 * - guard は app.rs で Router 全体に掛ける (ここでは route_layer しない)
 */
use axum::{Router, routing::get};

use crate::guard::LOGIN_PATH;
use crate::state::AppState;

use crate::pages::handlers::{content::content, health::health, login::login};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(LOGIN_PATH, get(login))
        .fallback(content)
}
