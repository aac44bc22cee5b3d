//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 8000)
//! - `DATABASE_URL` - `PostgreSQL` connection string, or `memory://` for the
//!   in-process store. Without it the API runs with no store attached.
//! - `DATABASE_NAME` - Database name, overriding the one in `DATABASE_URL`
//! - `LOG_FORMAT` - `pretty` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (e.g. production)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// URL scheme selecting the in-memory document store.
pub const MEMORY_STORE_SCHEME: &str = "memory://";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Where documents are stored.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// `PostgreSQL` reachable at the given URL.
    Postgres {
        /// Connection URL (contains password)
        url: SecretString,
        /// Overrides the database named in the URL
        database_name: Option<String>,
    },
    /// Process-local store; contents are lost on restart.
    Memory,
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Document store, if one is configured
    pub store: Option<StoreConfig>,
    /// Whether `DATABASE_URL` was set
    pub database_url_set: bool,
    /// Whether `DATABASE_NAME` was set
    pub database_name_set: bool,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or_default(&lookup, "HOST", "0.0.0.0")?;
        let port = parse_or_default(&lookup, "PORT", "8000")?;
        let log_format = parse_or_default(&lookup, "LOG_FORMAT", "pretty")?;

        let database_url = non_empty(lookup("DATABASE_URL"));
        let database_name = non_empty(lookup("DATABASE_NAME"));
        let database_url_set = database_url.is_some();
        let database_name_set = database_name.is_some();

        let store = database_url.map(|url| {
            if url.starts_with(MEMORY_STORE_SCHEME) {
                StoreConfig::Memory
            } else {
                StoreConfig::Postgres {
                    url: SecretString::from(url),
                    database_name,
                }
            }
        });

        Ok(Self {
            host,
            port,
            store,
            database_url_set,
            database_name_set,
            log_format,
            sentry_dsn: non_empty(lookup("SENTRY_DSN")),
            sentry_environment: non_empty(lookup("SENTRY_ENVIRONMENT")),
        })
    }

    /// Configuration for tests and local runs: loopback, ephemeral port,
    /// in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            store: Some(StoreConfig::Memory),
            database_url_set: true,
            database_name_set: false,
            log_format: LogFormat::Pretty,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StoreConfig {
    /// Short, secret-free description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Memory => "in-memory".to_string(),
            Self::Postgres { url, database_name } => {
                let host = url
                    .expose_secret()
                    .rsplit_once('@')
                    .map_or("postgres", |(_, rest)| rest);
                match database_name {
                    Some(name) => format!("postgres ({host}, database {name})"),
                    None => format!("postgres ({host})"),
                }
            }
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Treat empty values as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a variable, falling back to a default when unset.
fn parse_or_default<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = non_empty(lookup(key)).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
