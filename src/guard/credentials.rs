//! Request credentials (cookies) as seen by the guard.
//!
//! The jar is built once per request and never mutated afterwards.
//! Only the presence of the access token matters; its value is opaque here
//! and validated elsewhere (identity provider).

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Cookie carrying the access token issued by the identity provider.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    jar: CookieJar,
}

impl Credentials {
    /// Collect the cookies of every `Cookie` header of a request.
    ///
    /// Header values are decoded lossily: a non UTF-8 byte in one cookie only
    /// mangles that cookie, the others in the same header are still read
    /// (`CookieJar::from_headers` drops the whole header instead).
    /// Malformed pairs are skipped. When a name appears more than once, the
    /// first occurrence wins.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut credentials = Self::default();

        for value in headers.get_all(header::COOKIE) {
            let value = String::from_utf8_lossy(value.as_bytes());

            for pair in value.split(';') {
                if let Ok(cookie) = Cookie::parse(pair.trim().to_owned()) {
                    credentials.insert(cookie);
                }
            }
        }

        credentials
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut credentials = Self::default();
        for (name, value) in pairs {
            credentials.insert(Cookie::new(name.into(), value.into()));
        }
        credentials
    }

    fn insert(&mut self, cookie: Cookie<'static>) {
        if cookie.name().is_empty() || self.jar.get(cookie.name()).is_some() {
            return;
        }
        self.jar = std::mem::take(&mut self.jar).add(cookie);
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.jar.get(name).map(|cookie| cookie.value().to_owned())
    }

    pub fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_COOKIE)
    }

    pub fn has_access_token(&self) -> bool {
        self.jar.get(ACCESS_TOKEN_COOKIE).is_some()
    }
}
