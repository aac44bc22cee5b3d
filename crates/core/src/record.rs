//! Raw stored records and their JSON-safe normalized form.
//!
//! Stores hand back records as a map of typed [`RawValue`]s: the opaque
//! identifier lives under `_id` and the store-assigned timestamps under
//! `created_at` / `updated_at`. [`normalize`] turns such a record into a plain
//! JSON object suitable for an API response.

use std::collections::BTreeMap;
use std::collections::btree_map;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::types::RecordId;

/// Key holding the opaque identifier in a raw record.
pub const RAW_ID_KEY: &str = "_id";

/// Key holding the identifier in a normalized document.
pub const ID_KEY: &str = "id";

/// Creation timestamp key.
pub const CREATED_AT_KEY: &str = "created_at";

/// Last-update timestamp key.
pub const UPDATED_AT_KEY: &str = "updated_at";

/// A normalized document, ready to serialize.
pub type Document = serde_json::Map<String, Value>;

/// A single value in a raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Store-assigned identifier.
    Id(RecordId),
    /// Point in time, as recorded by the store.
    Timestamp(DateTime<Utc>),
    /// Any other JSON value from the document body.
    Json(Value),
}

impl RawValue {
    /// Render as JSON, turning identifiers and timestamps into strings.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Id(id) => Value::String(id.to_string()),
            Self::Timestamp(at) => Value::String(to_iso8601(&at)),
            Self::Json(value) => value,
        }
    }

    fn into_id_string(self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Timestamp(at) => to_iso8601(&at),
            Self::Json(Value::String(s)) => s,
            Self::Json(value) => value.to_string(),
        }
    }
}

impl From<RecordId> for RawValue {
    fn from(id: RecordId) -> Self {
        Self::Id(id)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Timestamp(at)
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// A record as returned by a store, before normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a document body plus the store metadata.
    ///
    /// Metadata wins over body fields with the same key.
    #[must_use]
    pub fn from_stored(
        id: RecordId,
        body: serde_json::Map<String, Value>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let mut record = Self::from(body);
        record.insert(RAW_ID_KEY, id);
        record.insert(CREATED_AT_KEY, created_at);
        record.insert(UPDATED_AT_KEY, updated_at);
        record
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Option<RawValue> {
        self.fields.insert(key.into(), value.into())
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    /// Remove a field.
    pub fn remove(&mut self, key: &str) -> Option<RawValue> {
        self.fields.remove(key)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, RawValue> {
        self.fields.iter()
    }
}

impl From<serde_json::Map<String, Value>> for RawRecord {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(key, value)| (key, RawValue::Json(value)))
            .collect()
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RawRecord {
    type Item = (String, RawValue);
    type IntoIter = btree_map::IntoIter<String, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Convert a raw record into a JSON-safe document.
///
/// - `_id` is removed and its string form stored under `id`. A record without
///   `_id` gets an empty `id`, unless it already has one.
/// - Timestamps (under `created_at`, `updated_at` or any other key) become
///   ISO-8601 strings; every other value passes through unchanged.
///
/// Normalizing an already-normalized document leaves it unchanged.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use supermarket_core::{RawRecord, RecordId, normalize};
///
/// let id = RecordId::generate();
/// let mut record = RawRecord::new();
/// record.insert("_id", id);
/// record.insert("created_at", Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap());
///
/// let document = normalize(record);
/// assert_eq!(document["id"], id.to_string());
/// assert_eq!(document["created_at"], "2024-05-01T12:30:00Z");
/// assert!(!document.contains_key("_id"));
/// ```
#[must_use]
pub fn normalize(mut record: RawRecord) -> Document {
    let id = record.remove(RAW_ID_KEY).map(RawValue::into_id_string);

    let mut document: Document = record
        .into_iter()
        .map(|(key, value)| (key, value.into_json()))
        .collect();

    match id {
        Some(id) => {
            document.insert(ID_KEY.to_owned(), Value::String(id));
        }
        None => {
            document
                .entry(ID_KEY)
                .or_insert_with(|| Value::String(String::new()));
        }
    }

    document
}

fn to_iso8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    fn as_map(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_normalize_renames_id_and_formats_timestamp() {
        let id = RecordId::generate();
        let mut record = RawRecord::new();
        record.insert(RAW_ID_KEY, id);
        record.insert(CREATED_AT_KEY, timestamp());

        let document = normalize(record);

        assert_eq!(
            Value::Object(document),
            json!({
                "id": id.to_string(),
                "created_at": "2024-05-01T12:30:00Z",
            })
        );
    }

    #[test]
    fn test_normalize_keeps_fractional_seconds() {
        let at = timestamp() + chrono::Duration::microseconds(250_000);
        let mut record = RawRecord::new();
        record.insert(UPDATED_AT_KEY, at);

        let document = normalize(record);
        assert_eq!(document[UPDATED_AT_KEY], json!("2024-05-01T12:30:00.250Z"));
    }

    #[test]
    fn test_normalize_without_timestamps_adds_none() {
        let record = RawRecord::from(as_map(json!({
            "_id": "abc123",
            "title": "Apples",
        })));

        let document = normalize(record);

        assert_eq!(
            Value::Object(document),
            json!({ "id": "abc123", "title": "Apples" })
        );
    }

    #[test]
    fn test_normalize_missing_id_uses_empty_string() {
        let record = RawRecord::from(as_map(json!({ "title": "Pears" })));
        let document = normalize(record);
        assert_eq!(document[ID_KEY], json!(""));
    }

    #[test]
    fn test_normalize_stringifies_non_string_ids() {
        let record = RawRecord::from(as_map(json!({ "_id": 42 })));
        let document = normalize(record);
        assert_eq!(document[ID_KEY], json!("42"));
    }

    #[test]
    fn test_normalize_passes_through_non_datetime_timestamps() {
        let record = RawRecord::from(as_map(json!({
            "_id": "x",
            "created_at": "yesterday",
            "updated_at": 1_714_566_600,
        })));

        let document = normalize(record);

        assert_eq!(document[CREATED_AT_KEY], json!("yesterday"));
        assert_eq!(document[UPDATED_AT_KEY], json!(1_714_566_600));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let record = RawRecord::from_stored(
            RecordId::generate(),
            as_map(json!({ "name": "Ada", "age": 36 })),
            timestamp(),
            timestamp(),
        );

        let once = normalize(record);
        let twice = normalize(RawRecord::from(once.clone()));

        assert_eq!(once, twice);
    }

    #[test]
    fn test_from_stored_metadata_overrides_body() {
        let id = RecordId::generate();
        let record = RawRecord::from_stored(
            id,
            as_map(json!({ "_id": "spoofed", "created_at": "spoofed" })),
            timestamp(),
            timestamp(),
        );

        assert_eq!(record.get(RAW_ID_KEY), Some(&RawValue::Id(id)));
        assert_eq!(
            record.get(CREATED_AT_KEY),
            Some(&RawValue::Timestamp(timestamp()))
        );
        assert_eq!(record.len(), 3);
    }
}
