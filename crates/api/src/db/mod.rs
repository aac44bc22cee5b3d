//! Document storage.
//!
//! Products and users are stored as schemaless JSON documents grouped into
//! named collections. Handlers never talk to a database directly; they go
//! through the [`DocumentStore`] trait, and the concrete store is chosen once
//! at startup from [`StoreConfig`].
//!
//! # Stores
//!
//! - [`PgDocumentStore`] - `PostgreSQL`, one `documents` table with a JSONB body
//! - [`MemoryDocumentStore`] - process-local, for tests and local runs
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p supermarket-cli -- migrate
//! ```

pub mod documents;
pub mod memory;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use supermarket_core::{RawRecord, RecordId};

use crate::config::StoreConfig;

pub use documents::PgDocumentStore;
pub use memory::MemoryDocumentStore;

/// A JSON object as persisted in a collection.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document could not be encoded as a JSON object.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}

/// Persistence for JSON documents grouped by collection.
#[async_trait]
pub trait DocumentStore: std::fmt::Debug + Send + Sync {
    /// Persist a document and return its new identifier.
    ///
    /// The store sets `created_at` and `updated_at` to the insertion time.
    async fn insert(&self, collection: &str, payload: Payload) -> Result<RecordId, RepositoryError>;

    /// Fetch up to `limit` documents, most recent first.
    ///
    /// `None` fetches the whole collection.
    async fn fetch(
        &self,
        collection: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RawRecord>, RepositoryError>;

    /// Names of the collections holding at least one document.
    async fn list_collections(&self) -> Result<Vec<String>, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool connects lazily: the first query opens a connection, so the API
/// can start (and report its status) while the database is down.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `database_name` - optional database overriding the one in the URL
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(
    database_url: &SecretString,
    database_name: Option<&str>,
) -> Result<PgPool, sqlx::Error> {
    let mut options = PgConnectOptions::from_str(database_url.expose_secret())?;
    if let Some(name) = database_name {
        options = options.database(name);
    }

    Ok(PgPoolOptions::new()
        .max_connections(10)
        .min_connections(0)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options))
}

/// Build the document store described by the configuration.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the `PostgreSQL` URL is invalid.
pub fn connect(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, RepositoryError> {
    let store: Arc<dyn DocumentStore> = match config {
        StoreConfig::Postgres { url, database_name } => {
            let pool = create_pool(url, database_name.as_deref())?;
            Arc::new(PgDocumentStore::new(pool))
        }
        StoreConfig::Memory => Arc::new(MemoryDocumentStore::new()),
    };

    tracing::info!(store = %config.describe(), "Document store configured");
    Ok(store)
}
