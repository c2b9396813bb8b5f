//! GraphQL envelope types and the GraphQL-over-HTTP client.
//!
//! Requests are posted as `{"query": ..., "variables": {...}}`. A response
//! is accepted only when the HTTP status is 2xx and its `errors` array is
//! empty.
//!
//! # Example
//!
//! ```ignore
//! use docgraph_net::graphql::{GraphQLClient, GraphQLRequest};
//! use docgraph_net::RequestContext;
//!
//! let client = GraphQLClient::builder("https://api.example.com/graphql")
//!     .header("X-Apito-Key", "my-key")
//!     .build()?;
//!
//! let request = GraphQLRequest::mutation(r#"
//!     mutation Debug($stage: String!, $data: JSON) {
//!         debug(stage: $stage, data: $data) { message data }
//!     }
//! "#)
//! .variable("stage", "init");
//!
//! let response = client.execute(request, &RequestContext::default()).await?;
//! let debug = response.field("debug")?;
//! ```

mod client;
mod request;
mod response;

pub use client::{DEFAULT_TENANT_HEADER, GraphQLClient, GraphQLClientBuilder};
pub use request::{GraphQLRequest, OperationType};
pub use response::{GraphQLError, GraphQLLocation, GraphQLResponse, PathSegment};
