//! Document operations against a Docgraph backend.
//!
//! [`DocgraphClient`] wraps a [`GraphQLClient`] with one method per backend
//! operation. Each method validates its arguments, performs exactly one
//! GraphQL call, and decodes the root field of the response. The `_typed`
//! variants additionally convert document payloads into a caller-chosen
//! type.

mod queries;
mod typed;
mod types;

pub use types::{AuditData, CreateAndUpdateRequest, RelationConnection, SearchFilter};

use std::time::Duration;

use docgraph_core::{Document, SearchResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::error::{Error, Result};
use crate::graphql::{GraphQLClient, GraphQLRequest, GraphQLResponse};
use crate::http::HttpClient;

/// Builder for [`DocgraphClient`].
pub struct DocgraphClientBuilder {
    config: ClientConfig,
    http_client: Option<HttpClient>,
}

impl DocgraphClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                base_url: base_url.into(),
                ..ClientConfig::default()
            },
            http_client: None,
        }
    }

    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = api_key.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Use an existing HTTP client instead of building one.
    ///
    /// The timeout and user agent settings are ignored in that case.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the name of the header carrying the API key.
    pub fn api_key_header(mut self, name: impl Into<String>) -> Self {
        self.config.api_key_header = name.into();
        self
    }

    /// Set the name of the header carrying the tenant id.
    pub fn tenant_header(mut self, name: impl Into<String>) -> Self {
        self.config.tenant_header = name.into();
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<DocgraphClient> {
        DocgraphClient::with_transport(self.config, self.http_client)
    }
}

/// Client for the document operations of a Docgraph backend.
///
/// Clones share the underlying connection pool. The client holds no
/// per-call state; tenant, deadline and cancellation travel in the
/// [`RequestContext`] passed to each method.
///
/// # Example
///
/// ```ignore
/// use docgraph_net::{DocgraphClient, RequestContext, SearchFilter};
///
/// let client = DocgraphClient::builder("https://api.example.com/secured/graphql")
///     .api_key("my-key")
///     .build()?;
///
/// let ctx = RequestContext::for_tenant("acme");
/// let todos = client
///     .search_resources(&ctx, "todo", &SearchFilter::new().limit(20))
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct DocgraphClient {
    graphql: GraphQLClient,
    config: ClientConfig,
}

impl DocgraphClient {
    /// Create a client from a configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_transport(config, None)
    }

    /// Start building a client for an endpoint.
    pub fn builder(base_url: impl Into<String>) -> DocgraphClientBuilder {
        DocgraphClientBuilder::new(base_url)
    }

    /// Create a client from the `DOCGRAPH_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    fn with_transport(config: ClientConfig, http_client: Option<HttpClient>) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::InvalidArgument("base URL is required".into()));
        }

        let mut builder = GraphQLClient::builder(config.base_url.as_str())
            .tenant_header(config.tenant_header.as_str());

        if !config.api_key.is_empty() {
            builder = builder.header(config.api_key_header.as_str(), config.api_key.as_str());
        }

        builder = match http_client {
            Some(client) => builder.http_client(client),
            None => {
                let mut http = HttpClient::builder().timeout(config.timeout);
                if let Some(ref user_agent) = config.user_agent {
                    http = http.user_agent(user_agent.as_str());
                }
                builder.http_client_builder(http)
            }
        };

        Ok(Self {
            graphql: builder.build()?,
            config,
        })
    }

    /// Get the configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying GraphQL client.
    pub fn graphql(&self) -> &GraphQLClient {
        &self.graphql
    }

    /// Fetch one document by id.
    ///
    /// With `single_page_data` set, the model's single-page document is
    /// returned and `id` may be empty.
    pub async fn get_single_resource(
        &self,
        ctx: &RequestContext,
        model: &str,
        id: &str,
        single_page_data: bool,
    ) -> Result<Document> {
        let request = GraphQLRequest::query(queries::GET_SINGLE_DATA)
            .variable("model", model)
            .variable("_id", id)
            .variable("single_page_data", single_page_data);

        let value = self.run(ctx, request, "getSingleData").await?;
        decode("getSingleData", value)
    }

    /// Search the documents of a model.
    pub async fn search_resources(
        &self,
        ctx: &RequestContext,
        model: &str,
        filter: &SearchFilter,
    ) -> Result<SearchResult> {
        if model.is_empty() {
            return Err(Error::InvalidArgument("model is required".into()));
        }

        let request = filter.apply(
            GraphQLRequest::query(queries::GET_MODEL_DATA).variable("model", model),
        );

        let value = self.run(ctx, request, "getModelData").await?;
        decode("getModelData", value)
    }

    /// Fetch the documents related to the document `id`.
    ///
    /// The connection's filter is applied to the related documents.
    pub async fn get_relation_documents(
        &self,
        ctx: &RequestContext,
        id: &str,
        connection: &RelationConnection,
    ) -> Result<SearchResult> {
        let variable = connection.to_variable(id)?;

        let mut request = GraphQLRequest::query(queries::GET_RELATION_DATA)
            .variable("model", connection.model.as_str())
            .variable("connection", variable);
        if let Some(ref filter) = connection.filter {
            request = filter.apply(request);
        }

        let value = self.run(ctx, request, "getModelData").await?;
        decode("getModelData", value)
    }

    /// Create a document.
    pub async fn create_new_resource(
        &self,
        ctx: &RequestContext,
        request: &CreateAndUpdateRequest,
    ) -> Result<Document> {
        let payload = request.validate_create()?;

        let gql = GraphQLRequest::mutation(queries::CREATE_DATA)
            .variable("model", request.model.as_str())
            .variable("payload", payload)
            .variable("single_page_data", request.single_page_data)
            .optional_variable("connect", request.connect.as_ref());

        let value = self.run(ctx, gql, "upsertModelData").await?;
        decode("upsertModelData", value)
    }

    /// Update an existing document.
    pub async fn update_resource(
        &self,
        ctx: &RequestContext,
        request: &CreateAndUpdateRequest,
    ) -> Result<Document> {
        let (id, payload) = request.validate_update()?;

        let gql = GraphQLRequest::mutation(queries::UPDATE_DATA)
            .variable("_id", id)
            .variable("model", request.model.as_str())
            .variable("payload", payload)
            .variable("single_page_data", request.single_page_data)
            .variable("force_update", request.force_update)
            .optional_variable("connect", request.connect.as_ref())
            .optional_variable("disconnect", request.disconnect.as_ref());

        let value = self.run(ctx, gql, "upsertModelData").await?;
        decode("upsertModelData", value)
    }

    /// Delete a document.
    ///
    /// Any successful response counts; its data is not inspected.
    pub async fn delete_resource(
        &self,
        ctx: &RequestContext,
        model: &str,
        id: &str,
    ) -> Result<()> {
        if model.is_empty() || id.is_empty() {
            return Err(Error::InvalidArgument("model and id are required".into()));
        }

        let request = GraphQLRequest::mutation(queries::DELETE_DATA)
            .variable("model", model)
            .variable("_id", id);

        self.execute(ctx, request, "deleteModelData").await?;
        Ok(())
    }

    /// Record an audit entry.
    ///
    /// Any successful response counts; its data is not inspected.
    pub async fn send_audit_log(&self, ctx: &RequestContext, audit: &AuditData) -> Result<()> {
        let request =
            GraphQLRequest::mutation(queries::SEND_AUDIT_LOG).variable("auditData", audit);

        self.execute(ctx, request, "sendAuditLog").await?;
        Ok(())
    }

    /// Send diagnostic data to the backend and return what it echoes.
    ///
    /// A missing or null `debug` field yields `Value::Null`.
    pub async fn debug(
        &self,
        ctx: &RequestContext,
        stage: &str,
        data: Vec<Value>,
    ) -> Result<Value> {
        let request = GraphQLRequest::mutation(queries::DEBUG)
            .variable("stage", stage)
            .variable("data", data);

        let response = self.execute(ctx, request, "debug").await?;
        if response.raw_data().is_some_and(|data| !data.is_object()) {
            return Err(Error::Shape("response data is not an object".into()));
        }
        Ok(response.take_field("debug").unwrap_or(Value::Null))
    }

    /// Exchange a token for one scoped to `tenant_id`.
    pub async fn generate_tenant_token(
        &self,
        ctx: &RequestContext,
        token: &str,
        tenant_id: &str,
    ) -> Result<String> {
        if token.is_empty() || tenant_id.is_empty() {
            return Err(Error::InvalidArgument("token and tenant id are required".into()));
        }

        let request = GraphQLRequest::mutation(queries::GENERATE_TENANT_TOKEN)
            .variable("token", token)
            .variable("tenantId", tenant_id);

        let value = self.run(ctx, request, "generateTenantToken").await?;
        match value.get("token") {
            Some(Value::String(token)) => Ok(token.clone()),
            _ => Err(Error::Shape("generateTenantToken did not return a token".into())),
        }
    }

    async fn execute(
        &self,
        ctx: &RequestContext,
        request: GraphQLRequest,
        root: &'static str,
    ) -> Result<GraphQLResponse> {
        debug!(
            target: "docgraph_net::resource",
            operation = root,
            tenant = ctx.tenant_id.is_some(),
            "Executing resource operation"
        );

        self.graphql.execute(request, ctx).await.inspect_err(|e| {
            warn!(target: "docgraph_net::resource", operation = root, error = %e, "Resource operation failed");
        })
    }

    async fn run(
        &self,
        ctx: &RequestContext,
        request: GraphQLRequest,
        root: &'static str,
    ) -> Result<Value> {
        let value = self.execute(ctx, request, root).await?.take_field(root)?;
        if value.is_null() {
            return Err(Error::Shape(format!("{root} returned null")));
        }
        Ok(value)
    }
}

fn decode<T: DeserializeOwned>(root: &str, value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| Error::Shape(format!("failed to decode {root}: {e}")))
}
