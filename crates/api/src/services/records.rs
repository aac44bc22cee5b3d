//! Creating and listing collection documents.

use serde::Serialize;
use supermarket_core::{Collection, Document, RecordId, normalize};
use tracing::instrument;

use crate::db::{DocumentStore, RepositoryError};

/// Record operations over a borrowed [`DocumentStore`].
pub struct RecordService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> RecordService<'a> {
    /// Create a new service.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Persist a validated value in `collection`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidDocument` if `value` does not
    /// serialize to a JSON object, or the store's error.
    #[instrument(skip(self, collection, value), fields(collection = %collection))]
    pub async fn create<T: Serialize + Sync>(
        &self,
        collection: Collection,
        value: &T,
    ) -> Result<RecordId, RepositoryError> {
        let serde_json::Value::Object(payload) = serde_json::to_value(value)? else {
            return Err(RepositoryError::InvalidDocument(format!(
                "{collection} must serialize to a JSON object"
            )));
        };

        let id = self.store.insert(collection.as_str(), payload).await?;
        tracing::info!(%id, "Document created");
        Ok(id)
    }

    /// Fetch up to `limit` documents from `collection`, newest first, in
    /// their public shape.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    #[instrument(skip(self, collection), fields(collection = %collection))]
    pub async fn list(
        &self,
        collection: Collection,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, RepositoryError> {
        let records = self.store.fetch(collection.as_str(), limit).await?;
        tracing::debug!(count = records.len(), "Documents fetched");
        Ok(records.into_iter().map(normalize).collect())
    }
}
