//! Process-local document store.
//!
//! Keeps every collection in memory behind a Tokio `RwLock`. Contents are lost
//! when the process exits. Selected with `DATABASE_URL=memory://` and used by
//! the test suites.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use supermarket_core::{RawRecord, RecordId};
use tokio::sync::RwLock;

use super::{DocumentStore, Payload, RepositoryError};

#[derive(Debug, Clone)]
struct StoredDocument {
    id: RecordId,
    body: Payload,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StoredDocument {
    fn to_raw(&self) -> RawRecord {
        RawRecord::from_stored(self.id, self.body.clone(), self.created_at, self.updated_at)
    }
}

/// In-memory [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<BTreeMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, payload: Payload) -> Result<RecordId, RepositoryError> {
        let id = RecordId::generate();
        let now = Utc::now();

        self.collections
            .write()
            .await
            .entry(collection.to_owned())
            .or_default()
            .push(StoredDocument {
                id,
                body: payload,
                created_at: now,
                updated_at: now,
            });

        Ok(id)
    }

    async fn fetch(
        &self,
        collection: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RawRecord>, RepositoryError> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let limit = limit.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));

        // Newest last in storage, newest first in results.
        Ok(documents
            .iter()
            .rev()
            .take(limit)
            .map(StoredDocument::to_raw)
            .collect())
    }

    async fn list_collections(&self) -> Result<Vec<String>, RepositoryError> {
        Ok(self
            .collections
            .read()
            .await
            .iter()
            .filter(|(_, documents)| !documents.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
