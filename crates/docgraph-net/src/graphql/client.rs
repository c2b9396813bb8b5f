//! GraphQL client implementation.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use super::request::GraphQLRequest;
use super::response::GraphQLResponse;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientBuilder};

/// Default header carrying the tenant id.
pub const DEFAULT_TENANT_HEADER: &str = "X-Apito-Tenant-ID";

/// Builder for creating a GraphQL client.
pub struct GraphQLClientBuilder {
    http_url: String,
    http_client: Option<HttpClient>,
    http_client_builder: Option<HttpClientBuilder>,
    default_headers: Vec<(String, String)>,
    tenant_header: String,
    request_timeout: Option<Duration>,
}

impl GraphQLClientBuilder {
    /// Create a new builder with the specified GraphQL endpoint URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http_url: url.into(),
            http_client: None,
            http_client_builder: None,
            default_headers: Vec::new(),
            tenant_header: DEFAULT_TENANT_HEADER.to_string(),
            request_timeout: None,
        }
    }

    /// Use an existing HTTP client.
    ///
    /// The client's own timeout applies; `request_timeout` is ignored.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Use a custom HTTP client builder.
    pub fn http_client_builder(mut self, builder: HttpClientBuilder) -> Self {
        self.http_client_builder = Some(builder);
        self
    }

    /// Add a default header to all requests.
    ///
    /// The pair is validated by [`build`](Self::build).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Set the name of the header carrying the tenant id.
    pub fn tenant_header(mut self, name: impl Into<String>) -> Self {
        self.tenant_header = name.into();
        self
    }

    /// Set the request timeout for HTTP operations.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the GraphQL client.
    ///
    /// Fails with [`Error::InvalidHeader`] if a default header or the tenant
    /// header name is not valid HTTP.
    pub fn build(self) -> Result<GraphQLClient> {
        url::Url::parse(&self.http_url)?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            default_headers.insert(
                HeaderName::try_from(name.as_str())?,
                HeaderValue::try_from(value.as_str())?,
            );
        }
        let tenant_header = HeaderName::try_from(self.tenant_header.as_str())?;

        let http_client = if let Some(client) = self.http_client {
            client
        } else if let Some(builder) = self.http_client_builder {
            builder.build()?
        } else {
            let mut builder = HttpClient::builder();
            if let Some(timeout) = self.request_timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        Ok(GraphQLClient {
            inner: Arc::new(GraphQLClientInner {
                http_client,
                http_url: self.http_url,
                default_headers,
                tenant_header,
            }),
        })
    }
}

struct GraphQLClientInner {
    http_client: HttpClient,
    http_url: String,
    default_headers: HeaderMap,
    tenant_header: HeaderName,
}

/// A GraphQL-over-HTTP client.
///
/// Each call to [`execute`](Self::execute) performs exactly one POST. There
/// is no retry, caching, or shared mutable state; clones share the
/// underlying connection pool.
///
/// # Example
///
/// ```ignore
/// use docgraph_net::{GraphQLClient, GraphQLRequest, RequestContext};
///
/// let client = GraphQLClient::builder("https://api.example.com/graphql")
///     .header("X-Apito-Key", "my-key")
///     .build()?;
///
/// let request = GraphQLRequest::query("{ ping }");
/// let response = client.execute(request, &RequestContext::default()).await?;
/// ```
#[derive(Clone)]
pub struct GraphQLClient {
    inner: Arc<GraphQLClientInner>,
}

impl GraphQLClient {
    /// Create a new builder for configuring a GraphQL client.
    pub fn builder(url: impl Into<String>) -> GraphQLClientBuilder {
        GraphQLClientBuilder::new(url)
    }

    /// Get the HTTP endpoint URL.
    pub fn url(&self) -> &str {
        &self.inner.http_url
    }

    /// Get the underlying HTTP client.
    pub fn http_client(&self) -> &HttpClient {
        &self.inner.http_client
    }

    /// Execute a GraphQL operation.
    ///
    /// Fails on an invalid tenant header value before anything is sent, on a
    /// non-2xx status, on a body that is not a GraphQL envelope, and on any
    /// reported GraphQL error, even when data is also present.
    pub async fn execute(
        &self,
        request: GraphQLRequest,
        ctx: &RequestContext,
    ) -> Result<GraphQLResponse> {
        if ctx.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut headers = self.inner.default_headers.clone();
        if let Some(ref tenant_id) = ctx.tenant_id {
            headers.insert(
                self.inner.tenant_header.clone(),
                HeaderValue::try_from(tenant_id.as_str())?,
            );
        }

        let mut req = self
            .inner
            .http_client
            .post(&self.inner.http_url)
            .header("Content-Type", "application/json")?
            .header("Accept", "application/json")?
            .headers(&headers);

        if let Some(timeout) = ctx.timeout {
            req = req.timeout(timeout);
        }

        let body = serde_json::to_string(&request)?;
        req = req.text(body);

        debug!(
            target: "docgraph_net::graphql",
            operation = %request.operation_type(),
            tenant = ctx.tenant_id.is_some(),
            "Sending GraphQL request"
        );

        let exchange = async {
            let response = req.send().await?;
            let status = response.status();
            let success = response.is_success();
            let body = response.text().await?;
            Ok::<_, Error>((status, success, body))
        };

        let (status, success, body) = match ctx.cancel {
            Some(ref token) => tokio::select! {
                result = exchange => result?,
                () = token.cancelled() => {
                    debug!(target: "docgraph_net::graphql", "GraphQL request cancelled");
                    return Err(Error::Cancelled);
                }
            },
            None => exchange.await?,
        };

        if !success {
            warn!(target: "docgraph_net::graphql", status, "GraphQL endpoint returned an error status");
            return Err(Error::HttpStatus { status, body });
        }

        let response: GraphQLResponse = serde_json::from_str(&body).map_err(|e| {
            Error::Shape(format!("response body is not a GraphQL envelope: {e}"))
        })?;

        if let Some(message) = response.error_message() {
            warn!(target: "docgraph_net::graphql", errors = %message, "GraphQL request reported errors");
        }

        response.into_result()
    }
}

impl std::fmt::Debug for GraphQLClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLClient")
            .field("http_url", &self.inner.http_url)
            .field("tenant_header", &self.inner.tenant_header)
            .finish()
    }
}
