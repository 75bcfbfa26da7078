//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKEND_API_URL` - Base URL of the REST backend (e.g. `http://localhost:8000/api`)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` URL for persistent sessions
//!   (falls back to `DATABASE_URL`; in-memory sessions when neither is set)
//! - `STOREFRONT_DEFAULT_LOCALE` - `en`, `fr` or `ar` (default: en)
//! - `QUERY_CACHE_TTL_SECS` - Lifetime of cached backend reads (default: 300)
//! - `QUERY_CACHE_MAX_ENTRIES` - Capacity of the read cache (default: 1000)
//! - `WISHLIST_RECONCILE_ON_VIEW` - Replace the local wishlist with the
//!   server's when the wishlist page is viewed (default: false)
//! - `STOREFRONT_RATE_LIMIT` - Rate limit auth and newsletter actions (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use smarthome_core::Locale;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// `PostgreSQL` URL for the session store (contains password)
    pub database_url: Option<SecretString>,
    /// Locale used when the visitor's preference cannot be determined
    pub default_locale: Locale,
    /// REST backend configuration
    pub backend: BackendConfig,
    /// Read cache configuration
    pub query_cache: QueryCacheConfig,
    /// Replace the local wishlist with server truth on wishlist page views
    pub wishlist_reconcile_on_view: bool,
    /// Apply rate limiting to auth and newsletter actions
    pub rate_limit: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// REST backend configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL that endpoint paths are appended to
    pub api_url: Url,
}

/// Read cache configuration.
#[derive(Debug, Clone, Copy)]
pub struct QueryCacheConfig {
    /// How long a cached read stays valid
    pub ttl: Duration,
    /// Maximum number of cached reads
    pub max_entries: u64,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 1000,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env_or_default("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        parse_http_url("STOREFRONT_BASE_URL", &base_url)?;
        let database_url = get_database_url("STOREFRONT_DATABASE_URL");
        let default_locale = parse_env_or_default("STOREFRONT_DEFAULT_LOCALE", "en")?;

        let backend = BackendConfig::from_env()?;
        let query_cache = QueryCacheConfig {
            ttl: Duration::from_secs(parse_env_or_default("QUERY_CACHE_TTL_SECS", "300")?),
            max_entries: parse_env_or_default("QUERY_CACHE_MAX_ENTRIES", "1000")?,
        };

        let wishlist_reconcile_on_view = parse_env_or_default("WISHLIST_RECONCILE_ON_VIEW", "false")?;
        let rate_limit = parse_env_or_default("STOREFRONT_RATE_LIMIT", "true")?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_rate("SENTRY_TRACES_SAMPLE_RATE", "0.1")?;

        Ok(Self {
            host,
            port,
            base_url,
            database_url,
            default_locale,
            backend,
            query_cache,
            wishlist_reconcile_on_view,
            rate_limit,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for tests and local tooling: in-memory sessions, no
    /// Sentry, rate limiting off.
    #[must_use]
    pub fn for_backend(api_url: Url) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            database_url: None,
            default_locale: Locale::En,
            backend: BackendConfig { api_url },
            query_cache: QueryCacheConfig::default(),
            wishlist_reconcile_on_view: false,
            rate_limit: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_required_env("BACKEND_API_URL")?;
        Ok(Self {
            api_url: parse_http_url("BACKEND_API_URL", &raw)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Option<SecretString> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env_or_default(key, default))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate in `0.0..=1.0`.
fn parse_rate(key: &str, default: &str) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env_or_default(key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Parse an absolute http(s) URL.
fn parse_http_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url: Url = parse_value(key, value)?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be an absolute http(s) URL (got {value})"),
        ));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_url() {
        let url = parse_http_url("TEST", "http://localhost:8000/api").unwrap();
        assert_eq!(url.path(), "/api");

        assert!(matches!(
            parse_http_url("TEST", "ftp://example.com"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            parse_http_url("TEST", "mailto:someone@example.com"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_http_url("TEST", "not a url").is_err());
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("STOREFRONT_PORT", "seventy").unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_PORT"));

        let locale: Locale = parse_value("STOREFRONT_DEFAULT_LOCALE", " ar ").unwrap();
        assert_eq!(locale, Locale::Ar);
        assert!(parse_value::<Locale>("STOREFRONT_DEFAULT_LOCALE", "de").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::for_backend(Url::parse("http://localhost:8000").unwrap());
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let mut config = StorefrontConfig::for_backend(Url::parse("http://localhost:8000").unwrap());
        config.database_url = Some(SecretString::from("postgres://user:hunter2@db/sessions"));

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("localhost"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_query_cache_defaults() {
        let defaults = QueryCacheConfig::default();
        assert_eq!(defaults.ttl, Duration::from_secs(300));
        assert_eq!(defaults.max_entries, 1000);
    }
}
