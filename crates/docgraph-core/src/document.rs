//! Untyped document and search result types.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The untyped payload of a document.
///
/// An ordered mapping from field name to JSON value. Values may be scalars,
/// nested mappings, or sequences.
pub type Payload = Map<String, Value>;

/// Lifecycle metadata attached to a document.
///
/// Every field is optional: which ones are populated depends on the query
/// that produced the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// Publication status (e.g. `published`, `draft`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Revision number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,

    /// Timestamp of the current revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_at: Option<String>,

    /// Identifier of the first revision of this document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_revision_id: Option<String>,
}

/// A single record returned by the backend.
///
/// Documents are only ever built from a response body. They are owned by the
/// caller that received them and are never cached or merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Partition/shard key.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Untyped payload. A `null` or missing payload decodes as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Payload,

    /// Lifecycle metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,

    /// Document identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Expiration marker, kept exactly as the backend sent it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<String>,

    /// Identifier of the relation edge, set when the document was reached
    /// through a relation traversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_doc_id: Option<String>,

    /// Type discriminator (usually the model name).
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub doc_type: String,
}

impl Document {
    /// Get a payload field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Check if this document was returned as part of a relation traversal.
    pub fn is_relation(&self) -> bool {
        self.relation_doc_id.is_some()
    }

    /// The expiration marker as Unix seconds, if present and parseable.
    pub fn expire_at_epoch(&self) -> Option<i64> {
        self.expire_at.as_deref().and_then(parse_expire_at)
    }
}

/// A page of documents plus the total number of matches.
///
/// `count` and `results` are supplied independently by the backend. The
/// count is the total across all pages and is not checked against
/// `results.len()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Documents in backend order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Document>,

    /// Total number of matching documents.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

impl SearchResult {
    /// Number of documents in this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if this page has no documents.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the documents in backend order.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.results.iter()
    }
}

impl IntoIterator for SearchResult {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Parse an expiration marker into Unix seconds.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS` (read as UTC), and
/// plain integer seconds. Returns `None` for empty or unrecognised input.
pub fn parse_expire_at(marker: &str) -> Option<i64> {
    let marker = marker.trim();
    if marker.is_empty() {
        return None;
    }

    if let Ok(seconds) = marker.parse::<i64>() {
        return Some(seconds);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(marker) {
        return Some(timestamp.timestamp());
    }

    NaiveDateTime::parse_from_str(marker, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
