//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! sm-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `DATABASE_NAME` - Optional database name overriding the URL's
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded at compile
//! time.

use secrecy::SecretString;
use supermarket_api::config::{ApiConfig, ConfigError, StoreConfig};
use supermarket_api::db;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// `DATABASE_URL` is unset.
    #[error("Missing environment variable: DATABASE_URL")]
    MissingDatabaseUrl,

    /// `DATABASE_URL` selects the in-memory store, which has no schema.
    #[error("DATABASE_URL points at the in-memory store; migrations need PostgreSQL")]
    MemoryStore,

    /// Invalid environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Pick the `PostgreSQL` connection out of the store configuration.
fn postgres_target(
    store: Option<&StoreConfig>,
) -> Result<(&SecretString, Option<&str>), MigrationError> {
    match store {
        None => Err(MigrationError::MissingDatabaseUrl),
        Some(StoreConfig::Memory) => Err(MigrationError::MemoryStore),
        Some(StoreConfig::Postgres { url, database_name }) => Ok((url, database_name.as_deref())),
    }
}

/// Run the API database migrations.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing or not `PostgreSQL`, the
/// database is unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ApiConfig::from_env()?;
    let (url, database_name) = postgres_target(config.store.as_ref())?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(url, database_name)?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
