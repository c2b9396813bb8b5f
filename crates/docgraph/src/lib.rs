//! Docgraph - a typed Rust client for Docgraph document backends.
//!
//! This is the umbrella crate that re-exports all public APIs. The document
//! model and conversion layer are always available; the GraphQL client is
//! behind the default `client` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "client")]
//! # async fn run() -> Result<(), docgraph::Error> {
//! use docgraph::{DocgraphClient, RequestContext};
//!
//! let client = DocgraphClient::from_env()?;
//! let ctx = RequestContext::from_env();
//!
//! let todo = client.get_single_resource(&ctx, "todo", "t1", false).await?;
//! println!("{}", todo.id);
//! # Ok(())
//! # }
//! ```

pub use docgraph_core::*;

#[cfg(feature = "client")]
pub use docgraph_net::*;

/// The crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the crate version.
pub fn version() -> &'static str {
    VERSION
}
