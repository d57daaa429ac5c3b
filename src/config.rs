/*
 * Responsibility
 * - Load host settings from the environment (PORT, APP_ENV, PUBLIC_ORIGIN, ...)
 * - Validate them (fail at startup when something is malformed)
 *
 * Notes
 * - Guard rules (protected prefixes, login path, cookie name) are constants in
 *   `guard`, not configuration.
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    // Origin used for login redirects; when unset, it comes from each request.
    pub public_origin: Option<Url>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source (`from_env` passes the
    /// process environment).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = positive_number::<u16>(&lookup, "PORT")?.unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env =
            AppEnv::parse(&lookup("APP_ENV").unwrap_or_else(|| "development".to_string()));

        let public_origin = match lookup("PUBLIC_ORIGIN") {
            Some(s) if !s.trim().is_empty() => Some(parse_origin(s.trim())?),
            _ => None,
        };

        let request_timeout_seconds =
            positive_number::<u64>(&lookup, "REQUEST_TIMEOUT_SECONDS")?.unwrap_or(30);

        Ok(Self {
            addr,
            app_env,
            public_origin,
            request_timeout: Duration::from_secs(request_timeout_seconds),
        })
    }
}

/// `Ok(None)` when unset; zero and non-numeric values are invalid.
fn positive_number<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    match lookup(key) {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<T>()
            .ok()
            .filter(|n| *n > T::default())
            .map(Some)
            .ok_or(ConfigError::Invalid(key)),
    }
}

/// Accept only absolute http(s) URLs with a host. Path, query and fragment
/// are discarded; only the origin is kept.
fn parse_origin(value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value).map_err(|_| ConfigError::Invalid("PUBLIC_ORIGIN"))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::Invalid("PUBLIC_ORIGIN"));
    }

    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() -> anyhow::Result<()> {
        let config = load(&[])?;
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.public_origin.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn reads_every_setting() -> anyhow::Result<()> {
        let config = load(&[
            ("PORT", "8080"),
            ("APP_ENV", "prod"),
            ("PUBLIC_ORIGIN", "https://example.com"),
            ("REQUEST_TIMEOUT_SECONDS", "5"),
        ])?;
        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(
            config.public_origin.as_ref().map(Url::as_str),
            Some("https://example.com/")
        );
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn port_must_be_a_positive_number() {
        for bad in ["abc", "0", "-1", "70000"] {
            assert_eq!(
                load(&[("PORT", bad)]).err(),
                Some(ConfigError::Invalid("PORT")),
                "PORT={bad}"
            );
        }
    }

    #[test]
    fn request_timeout_must_be_a_positive_number() {
        for bad in ["abc", "0", "", "1.5"] {
            assert_eq!(
                load(&[("REQUEST_TIMEOUT_SECONDS", bad)]).err(),
                Some(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS")),
                "REQUEST_TIMEOUT_SECONDS={bad}"
            );
        }
    }

    #[test]
    fn blank_public_origin_means_unset() -> anyhow::Result<()> {
        assert!(load(&[("PUBLIC_ORIGIN", "  ")])?.public_origin.is_none());
        Ok(())
    }

    #[test]
    fn invalid_public_origin_fails_startup() {
        assert_eq!(
            load(&[("PUBLIC_ORIGIN", "example.com")]).err(),
            Some(ConfigError::Invalid("PUBLIC_ORIGIN"))
        );
    }

    #[test]
    fn app_env_accepts_short_and_long_production_names() {
        assert_eq!(AppEnv::parse("production"), AppEnv::Production);
        assert_eq!(AppEnv::parse("PROD"), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
        assert!(!AppEnv::parse("").is_production());
    }

    #[test]
    fn public_origin_keeps_only_the_origin() {
        let url = parse_origin("https://example.com:8443/app?x=1#y").expect("valid origin");
        assert_eq!(url.as_str(), "https://example.com:8443/");
    }

    #[test]
    fn public_origin_rejects_non_http_urls() {
        assert_eq!(
            parse_origin("ftp://example.com"),
            Err(ConfigError::Invalid("PUBLIC_ORIGIN"))
        );
        assert_eq!(
            parse_origin("example.com"),
            Err(ConfigError::Invalid("PUBLIC_ORIGIN"))
        );
    }

    #[test]
    fn config_error_message_names_the_key() {
        assert_eq!(
            ConfigError::Invalid("PUBLIC_ORIGIN").to_string(),
            "invalid configuration: PUBLIC_ORIGIN"
        );
    }
}
