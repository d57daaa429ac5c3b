//! Cookie-based route guard for an axum application.
//!
//! - `guard`: pure decision (`/vip*`, `/admin*` need `sb-access-token`, else `/login`)
//! - `middleware::access_guard`: axum wiring for the guard
//! - `app`: runnable host service (config, tracing, router, serve)
pub mod app;
pub mod config;
pub mod error;
pub mod guard;
pub mod middleware;
pub mod pages;
pub mod state;
