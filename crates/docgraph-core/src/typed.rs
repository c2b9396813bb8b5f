//! Typed projections of documents and search results.
//!
//! Every typed operation in the client funnels through [`convert_document`],
//! so all call sites share the same conversion rules:
//!
//! - the raw payload is written back to JSON bytes and decoded as `T`
//! - payload fields that `T` does not declare are dropped
//! - fields of `T` missing from the payload follow `T`'s serde defaults
//!   (use `#[serde(default)]` to get zero values)
//! - every other document field is copied verbatim

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{Document, DocumentMeta, Payload, SearchResult};
use crate::error::ConversionError;

/// A document whose payload has been projected into `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedDocument<T> {
    /// Partition/shard key.
    #[serde(rename = "_key", default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Typed payload.
    pub data: T,

    /// Lifecycle metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,

    /// Document identifier.
    pub id: String,

    /// Expiration marker, kept exactly as the backend sent it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<String>,

    /// Identifier of the relation edge, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_doc_id: Option<String>,

    /// Type discriminator.
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl<T> TypedDocument<T> {
    /// The expiration marker as Unix seconds, if present and parseable.
    pub fn expire_at_epoch(&self) -> Option<i64> {
        self.expire_at.as_deref().and_then(crate::parse_expire_at)
    }

    /// Consume the document and return its payload.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// A search result whose documents have all been projected into `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedSearchResult<T> {
    /// Typed documents in backend order.
    pub results: Vec<TypedDocument<T>>,

    /// Total number of matching documents, as reported by the backend.
    pub count: u64,
}

impl<T> TypedSearchResult<T> {
    /// Number of documents in this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if this page has no documents.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the typed payloads in backend order.
    pub fn data(&self) -> impl Iterator<Item = &T> {
        self.results.iter().map(|doc| &doc.data)
    }
}

/// Project a raw document into a typed document.
///
/// Fails with [`ConversionError`] if the payload does not fit `T`; no partial
/// document is ever returned.
///
/// Fields of `T` that are absent from the payload take their zero value only
/// when `T` (or the field) is marked `#[serde(default)]`. Without it, a
/// missing field is a conversion error naming that field. Payload keys that
/// `T` does not declare are ignored unless `T` denies unknown fields.
pub fn convert_document<T: DeserializeOwned>(
    raw: &Document,
) -> Result<TypedDocument<T>, ConversionError> {
    let data = decode_payload(&raw.data)?;

    Ok(TypedDocument {
        key: raw.key.clone(),
        data,
        meta: raw.meta.clone(),
        id: raw.id.clone(),
        expire_at: raw.expire_at.clone(),
        relation_doc_id: raw.relation_doc_id.clone(),
        doc_type: raw.doc_type.clone(),
    })
}

/// Project every document of a search result into `T`.
///
/// Order and `count` are preserved. The conversion is all-or-nothing: the
/// first document that fails aborts the whole call, and the error records
/// its index.
pub fn convert_search_result<T: DeserializeOwned>(
    raw: &SearchResult,
) -> Result<TypedSearchResult<T>, ConversionError> {
    if raw.count != raw.results.len() as u64 {
        debug!(
            target: "docgraph_core::typed",
            count = raw.count,
            len = raw.results.len(),
            "search result count differs from page length"
        );
    }

    let results = raw
        .results
        .iter()
        .enumerate()
        .map(|(index, doc)| convert_document(doc).map_err(|err| err.at(index)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TypedSearchResult {
        results,
        count: raw.count,
    })
}

impl Document {
    /// Project this document into `T`. See [`convert_document`].
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<TypedDocument<T>, ConversionError> {
        convert_document(self)
    }
}

impl SearchResult {
    /// Project this result into `T`. See [`convert_search_result`].
    pub fn to_typed<T: DeserializeOwned>(
        &self,
    ) -> Result<TypedSearchResult<T>, ConversionError> {
        convert_search_result(self)
    }
}

fn decode_payload<T: DeserializeOwned>(payload: &Payload) -> Result<T, ConversionError> {
    let bytes = serde_json::to_vec(payload)
        .map_err(|source| ConversionError::Serialize { index: None, source })?;

    let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        ConversionError::Deserialize {
            path: err.path().to_string(),
            target: std::any::type_name::<T>(),
            index: None,
            source: err.into_inner(),
        }
    })
}
