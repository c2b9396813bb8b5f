//! GraphQL transport and document operations for Docgraph.
//!
//! This crate talks to a Docgraph backend over GraphQL-over-HTTP:
//!
//! - **Resource Client**: [`DocgraphClient`], one method per document operation
//! - **GraphQL Client**: request/response envelopes and a single-POST executor
//! - **HTTP Transport**: a pooled `reqwest` client with timeouts and headers
//!
//! Payload conversion lives in `docgraph-core`; its types are re-exported here.
//!
//! # Resource Operations
//!
//! ```ignore
//! use docgraph_net::{DocgraphClient, RequestContext, SearchFilter};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct Todo {
//!     title: String,
//!     done: bool,
//! }
//!
//! let client = DocgraphClient::builder("https://api.example.com/secured/graphql")
//!     .api_key("my-key")
//!     .build()?;
//!
//! let ctx = RequestContext::for_tenant("acme").timeout(Duration::from_secs(5));
//! let page = client
//!     .search_resources_typed::<Todo>(&ctx, "todo", &SearchFilter::new().limit(10))
//!     .await?;
//!
//! for todo in page.data() {
//!     println!("{} ({})", todo.title, todo.done);
//! }
//! ```
//!
//! ## Cancellation
//!
//! ```ignore
//! use docgraph_net::{CancelToken, RequestContext};
//!
//! let token = CancelToken::new();
//! let ctx = RequestContext::new().cancel_token(token.clone());
//!
//! let call = client.get_single_resource(&ctx, "todo", "t1", false);
//! token.cancel(); // the call returns Error::Cancelled
//! ```
//!
//! ## Configuration
//!
//! ```ignore
//! // DOCGRAPH_BASE_URL, DOCGRAPH_API_KEY, DOCGRAPH_TIMEOUT_SECS
//! let client = DocgraphClient::from_env()?;
//! // DOCGRAPH_TENANT_ID
//! let ctx = RequestContext::from_env();
//! ```

mod config;
mod context;
mod error;
pub mod graphql;
pub mod http;
mod resource;

pub use config::{
    API_KEY_ENV, BASE_URL_ENV, ClientConfig, DEFAULT_API_KEY_HEADER, DEFAULT_TIMEOUT, TIMEOUT_ENV,
};
pub use context::{CancelToken, RequestContext, TENANT_ID_ENV};
pub use error::{Error, Result};

// Re-export commonly used types at the crate root
pub use graphql::{
    DEFAULT_TENANT_HEADER, GraphQLClient, GraphQLError, GraphQLRequest, GraphQLResponse,
};
pub use http::{HttpClient, HttpClientBuilder};
pub use resource::{
    AuditData, CreateAndUpdateRequest, DocgraphClient, DocgraphClientBuilder, RelationConnection,
    SearchFilter,
};

pub use docgraph_core::{
    ConversionError, Document, DocumentMeta, Payload, SearchResult, TypedDocument,
    TypedSearchResult, convert_document, convert_search_result,
};
