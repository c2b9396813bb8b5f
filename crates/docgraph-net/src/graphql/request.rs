//! GraphQL request types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GraphQL operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    /// A query operation (read-only).
    #[default]
    Query,
    /// A mutation operation (modifies data).
    Mutation,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Mutation => write!(f, "mutation"),
        }
    }
}

/// A GraphQL request.
///
/// Serializes to the `{"query": ..., "variables": {...}}` envelope posted to
/// the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLRequest {
    /// The GraphQL document.
    pub query: String,

    /// Variables for the operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,

    /// Optional operation name (for documents with multiple operations).
    #[serde(skip_serializing_if = "Option::is_none", rename = "operationName")]
    pub operation_name: Option<String>,

    #[serde(skip)]
    pub(crate) operation_type: OperationType,
}

impl GraphQLRequest {
    /// Create a new query request.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = GraphQLRequest::query(r#"
    ///     query GetSingleData($model: String, $_id: String!) {
    ///         getSingleData(model: $model, _id: $_id) { id data }
    ///     }
    /// "#)
    /// .variable("model", "todo")
    /// .variable("_id", "t1");
    /// ```
    pub fn query(query: impl Into<String>) -> Self {
        Self::with_type(query.into(), OperationType::Query)
    }

    /// Create a new mutation request.
    pub fn mutation(query: impl Into<String>) -> Self {
        Self::with_type(query.into(), OperationType::Mutation)
    }

    fn with_type(query: String, operation_type: OperationType) -> Self {
        Self {
            query,
            variables: None,
            operation_name: None,
            operation_type,
        }
    }

    /// Set a variable value.
    ///
    /// Values that fail to serialize are skipped with a warning.
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        let name = name.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                self.variables
                    .get_or_insert_with(Map::new)
                    .insert(name, value);
            }
            Err(e) => {
                tracing::warn!(target: "docgraph_net::graphql", variable = %name, "Skipping unserializable variable: {}", e);
            }
        }
        self
    }

    /// Set a variable only when a value is present.
    pub fn optional_variable<T: Serialize>(
        self,
        name: impl Into<String>,
        value: Option<T>,
    ) -> Self {
        match value {
            Some(value) => self.variable(name, value),
            None => self,
        }
    }

    /// Set the operation name.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Get the operation type.
    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    /// Get a variable by name.
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.as_ref().and_then(|vars| vars.get(name))
    }
}
