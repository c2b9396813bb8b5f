//! Document model and typed conversion layer for Docgraph.
//!
//! This crate holds everything that sits between a raw GraphQL JSON payload
//! and strongly-typed application data:
//!
//! - **Document**: the backend's canonical record, with an untyped payload
//! - **Search Result**: an ordered page of documents plus a total count
//! - **Typed Document**: a document whose payload is projected into a
//!   caller-chosen shape `T`
//! - **Conversion**: the single routine that performs that projection
//!
//! No I/O happens here. Fetching documents is the job of `docgraph-net`.
//!
//! # Example
//!
//! ```
//! use docgraph_core::{Document, convert_document};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize, PartialEq)]
//! #[serde(default)]
//! struct Todo {
//!     title: String,
//!     done: bool,
//! }
//!
//! let raw: Document = serde_json::from_str(
//!     r#"{"id":"t1","data":{"title":"Buy milk","done":false},"type":"todo"}"#,
//! )?;
//!
//! let typed = convert_document::<Todo>(&raw)?;
//! assert_eq!(typed.id, "t1");
//! assert_eq!(typed.data.title, "Buy milk");
//! assert_eq!(typed.doc_type, "todo");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod error;
mod typed;

pub use document::{Document, DocumentMeta, Payload, SearchResult, parse_expire_at};
pub use error::ConversionError;
pub use typed::{TypedDocument, TypedSearchResult, convert_document, convert_search_result};
