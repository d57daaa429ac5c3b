/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → AppState 生成 → Router 組み立て
 * - Middleware の適用 (access guard → http layers の順)
 * - axum::serve() で起動
 */
use std::{panic, process};

use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::guard::AccessPolicy;
use crate::middleware;
use crate::pages;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,route_guard=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting route guard in {:?} mode on {}",
        config.app_env,
        config.addr
    );
    match &config.public_origin {
        Some(origin) => tracing::info!(%origin, "login redirects use configured origin"),
        None => tracing::info!("login redirects use each request's origin"),
    }

    let state = AppState::new(AccessPolicy::default(), config.public_origin.clone());
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(AppError::Bind)?;
    axum::serve(listener, app).await.map_err(AppError::Serve)?;

    Ok(())
}

/// Pages behind the access guard, wrapped in the HTTP layers.
///
/// The guard sits on the top-level router so it also covers the fallback.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = pages::routes();
    let router = middleware::access_guard::apply(router, state.clone());
    let router = router.with_state(state);

    middleware::http::apply(router, config.request_timeout)
}
