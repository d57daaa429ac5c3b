//! Protected-path policy and the guard decision.
//!
//! Matching is a plain string prefix test, not a path-segment test:
//! `/administrator` and `/vipstuff` are protected too.

use url::Url;

use super::credentials::Credentials;

/// Path prefixes that require an access token.
pub const PROTECTED_PREFIXES: [&str; 2] = ["/vip", "/admin"];

/// Where unauthenticated visitors of a protected path are sent.
pub const LOGIN_PATH: &str = "/login";

/// What the guard sees of a request.
///
/// `url` supplies the origin of the redirect. `path` is what gets matched;
/// it defaults to `url.path()`, but callers should pass the raw path their
/// router dispatches on (`Url` resolves dot segments, routers usually don't).
#[derive(Debug, Clone)]
pub struct GuardRequest {
    url: Url,
    path: String,
    credentials: Credentials,
}

impl GuardRequest {
    pub fn new(url: Url, credentials: Credentials) -> Self {
        let path = url.path().to_string();
        Self {
            url,
            path,
            credentials,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Let the request through untouched.
    Continue,
    /// Send the client to the given login URL.
    Redirect(Url),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    protected_prefixes: Vec<&'static str>,
    login_path: &'static str,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            protected_prefixes: PROTECTED_PREFIXES.to_vec(),
            login_path: LOGIN_PATH,
        }
    }
}

impl AccessPolicy {
    pub fn login_path(&self) -> &'static str {
        self.login_path
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }

    /// The token's value is never inspected, only its presence.
    pub fn requires_login(&self, path: &str, credentials: &Credentials) -> bool {
        self.is_protected(path) && !credentials.has_access_token()
    }

    /// Login URL on the same origin as `request_url`.
    ///
    /// Scheme, host and port are kept; path is replaced; query and fragment
    /// are dropped.
    pub fn login_url(&self, request_url: &Url) -> Url {
        let mut url = request_url.clone();
        url.set_path(self.login_path);
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    pub fn decide(&self, request: &GuardRequest) -> Decision {
        if self.requires_login(request.path(), request.credentials()) {
            Decision::Redirect(self.login_url(request.url()))
        } else {
            Decision::Continue
        }
    }
}
