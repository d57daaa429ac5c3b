//! Route guard middleware: `/vip*` and `/admin*` require the access-token cookie.
//!
//! The decision itself lives in `crate::guard` (pure, no axum). This layer only:
//! - collects cookies into `Credentials`
//! - works out the request's origin so the redirect stays on the same site
//! - turns `Decision::Redirect` into `307 Temporary Redirect`
//!
//! Origin resolution order:
//! 1. `PUBLIC_ORIGIN` (config)
//! 2. absolute request URI (`scheme://authority/...`)
//! 3. `Host` header, scheme from `X-Forwarded-Proto` (default `http`)
//!
//! With no origin at all, the `Location` header is the relative login path.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Uri, header},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use url::Url;

use crate::guard::{Credentials, Decision, GuardRequest};
use crate::state::AppState;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Put the guard in front of every route (and the fallback) of `router`.
///
/// Apply it on the top-level router: nested routers see a stripped path.
///
/// ```ignore
/// let router = pages::routes();
/// let router = middleware::access_guard::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, access_guard_middleware))
}

async fn access_guard_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let credentials = Credentials::from_headers(req.headers());
    let path = req.uri().path().to_string();

    let Some(url) = request_url(req.uri(), req.headers(), state.public_origin.as_deref()) else {
        if state.policy.requires_login(&path, &credentials) {
            tracing::info!(
                path = %path,
                "no origin for request, redirecting to relative login path"
            );
            return Redirect::temporary(state.policy.login_path()).into_response();
        }
        return next.run(req).await;
    };

    let guard_request = GuardRequest::new(url, credentials).with_path(path);

    match state.policy.decide(&guard_request) {
        Decision::Continue => {
            tracing::debug!(path = %guard_request.path(), "access guard: continue");
            next.run(req).await
        }
        Decision::Redirect(target) => {
            tracing::info!(
                path = %guard_request.path(),
                location = %target,
                "access token missing, redirecting to login"
            );
            Redirect::temporary(target.as_str()).into_response()
        }
    }
}

/// Absolute URL of the request, or `None` when no origin can be determined.
fn request_url(uri: &Uri, headers: &HeaderMap, public_origin: Option<&Url>) -> Option<Url> {
    let mut url = match public_origin {
        Some(origin) => origin.clone(),
        None => origin_from_request(uri, headers)?,
    };
    url.set_path(uri.path());
    url.set_query(uri.query());
    Some(url)
}

fn origin_from_request(uri: &Uri, headers: &HeaderMap) -> Option<Url> {
    if let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) {
        return parse_origin(scheme, authority.as_str());
    }

    let host = headers.get(header::HOST)?.to_str().ok()?.trim();
    if host.is_empty() {
        return None;
    }

    let scheme = headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| "http".to_string());

    parse_origin(&scheme, host)
}

// Reject hosts that smuggle a path, query or credentials.
fn parse_origin(scheme: &str, host: &str) -> Option<Url> {
    let url = Url::parse(&format!("{scheme}://{host}/")).ok()?;
    let clean = url.host_str().is_some()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
        && url.password().is_none();
    clean.then_some(url)
}
