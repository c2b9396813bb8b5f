//! HTTP transport.
//!
//! A thin layer over a pooled `reqwest` client. The GraphQL client posts
//! every operation through it.
//!
//! # Example
//!
//! ```ignore
//! use docgraph_net::http::HttpClient;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(60))
//!     .user_agent("MyApp/1.0")
//!     .build()?;
//!
//! let response = client
//!     .post("https://api.example.com/graphql")
//!     .header("Content-Type", "application/json")?
//!     .text(r#"{"query": "{ ping }"}"#)
//!     .send()
//!     .await?;
//! let body = response.text().await?;
//! ```

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use request::HttpRequestBuilder;
pub use response::HttpResponse;
