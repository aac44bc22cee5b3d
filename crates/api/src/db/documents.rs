//! `PostgreSQL` document store.
//!
//! All collections share one table:
//!
//! ```sql
//! documents (
//!     id          UUID PRIMARY KEY,
//!     collection  TEXT NOT NULL,
//!     body        JSONB NOT NULL,
//!     created_at  TIMESTAMPTZ NOT NULL,
//!     updated_at  TIMESTAMPTZ NOT NULL
//! )
//! ```
//!
//! Queries are built at runtime (`sqlx::query_as`) so the crate compiles
//! without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use supermarket_core::{RawRecord, RecordId};

use super::{DocumentStore, Payload, RepositoryError};

/// Row shape returned by document queries.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: RecordId,
    body: Json<Payload>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for RawRecord {
    fn from(row: DocumentRow) -> Self {
        Self::from_stored(row.id, row.body.0, row.created_at, row.updated_at)
    }
}

/// [`DocumentStore`] backed by the `documents` table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, collection: &str, payload: Payload) -> Result<RecordId, RepositoryError> {
        let id = RecordId::generate();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO documents (id, collection, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ",
        )
        .bind(id)
        .bind(collection)
        .bind(Json(&payload))
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn fetch(
        &self,
        collection: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RawRecord>, RepositoryError> {
        // LIMIT NULL means no limit.
        let rows = sqlx::query_as::<_, DocumentRow>(
            r"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY created_at DESC, id
            LIMIT $2
            ",
        )
        .bind(collection)
        .bind(limit.map(i64::from))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RawRecord::from).collect())
    }

    async fn list_collections(&self) -> Result<Vec<String>, RepositoryError> {
        let names = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT collection
            FROM documents
            ORDER BY collection
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
