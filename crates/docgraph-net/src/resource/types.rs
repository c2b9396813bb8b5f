//! Argument types for the resource operations.

use docgraph_core::Payload;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::graphql::GraphQLRequest;

/// Paging and matching options for a search.
///
/// Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Backend-specific where clause.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Value>,

    /// Free-text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl SearchFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the where clause.
    pub fn where_clause(mut self, clause: Value) -> Self {
        self.where_clause = Some(clause);
        self
    }

    /// Set the free-text search.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Add the set fields to a request as top-level variables.
    pub(crate) fn apply(&self, request: GraphQLRequest) -> GraphQLRequest {
        request
            .optional_variable("page", self.page)
            .optional_variable("limit", self.limit)
            .optional_variable("where", self.where_clause.as_ref())
            .optional_variable("search", self.search.as_deref())
    }
}

/// Describes a relation traversal: the target model and how to filter it.
///
/// Backend-specific options (relation name, direction, ...) go in `extra`
/// and are sent alongside `model` and `filter`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationConnection {
    /// Target model.
    pub model: String,

    /// Filter applied to the related documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,

    /// Additional connection options.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RelationConnection {
    /// Create a connection to a target model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set the filter.
    pub fn filter(mut self, filter: SearchFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set an additional connection option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the `connection` variable for the document `id`.
    ///
    /// `_id` is only added when the caller has not set it already.
    pub(crate) fn to_variable(&self, id: &str) -> Result<Value> {
        if self.model.is_empty() {
            return Err(Error::InvalidArgument(
                "model is required in connection parameters".into(),
            ));
        }

        let mut value = serde_json::to_value(self)?;
        if let Value::Object(ref mut map) = value
            && !id.is_empty()
            && !map.contains_key("_id")
        {
            map.insert("_id".into(), Value::String(id.to_string()));
        }
        Ok(value)
    }
}

/// Arguments for creating or updating a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateAndUpdateRequest {
    /// Document id; required for updates, ignored for creates.
    pub id: Option<String>,
    /// Model the document belongs to.
    pub model: String,
    /// Document payload.
    pub payload: Option<Payload>,
    /// Relations to connect.
    pub connect: Option<Value>,
    /// Relations to disconnect (updates only).
    pub disconnect: Option<Value>,
    /// Operate on the model's single-page document.
    pub single_page_data: bool,
    /// Overwrite without revision checks (updates only).
    pub force_update: bool,
}

impl CreateAndUpdateRequest {
    /// Start a request for a model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set the document id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the payload from an untyped mapping.
    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set the payload from any value that serializes to a JSON object.
    pub fn with_payload<T: Serialize>(self, payload: &T) -> Result<Self> {
        match serde_json::to_value(payload)? {
            Value::Object(map) => Ok(self.payload(map)),
            other => Err(Error::InvalidArgument(format!(
                "payload must serialize to an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Set the relations to connect.
    pub fn connect(mut self, connect: Value) -> Self {
        self.connect = Some(connect);
        self
    }

    /// Set the relations to disconnect.
    pub fn disconnect(mut self, disconnect: Value) -> Self {
        self.disconnect = Some(disconnect);
        self
    }

    /// Target the model's single-page document.
    pub fn single_page_data(mut self, enabled: bool) -> Self {
        self.single_page_data = enabled;
        self
    }

    /// Skip revision checks on update.
    pub fn force_update(mut self, enabled: bool) -> Self {
        self.force_update = enabled;
        self
    }

    pub(crate) fn validate_create(&self) -> Result<&Payload> {
        if self.model.is_empty() {
            return Err(Error::InvalidArgument("model is required".into()));
        }
        self.payload
            .as_ref()
            .ok_or_else(|| Error::InvalidArgument("payload is required".into()))
    }

    pub(crate) fn validate_update(&self) -> Result<(&str, &Payload)> {
        let id = self
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::InvalidArgument("id is required".into()))?;
        let payload = self.validate_create()?;
        Ok((id, payload))
    }
}

/// An audit record.
///
/// `additional_fields` are merged into the top level of the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditData {
    /// Resource acted on.
    pub resource: String,
    /// Action performed.
    pub action: String,
    /// Who performed the action.
    #[serde(default)]
    pub author: Payload,
    /// Data involved in the action.
    #[serde(default)]
    pub data: Payload,
    /// Free-form metadata.
    #[serde(default)]
    pub meta: Payload,
    /// Extra top-level fields.
    #[serde(flatten)]
    pub additional_fields: Payload,
}

impl AuditData {
    /// Create a record for a resource and action.
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
            ..Self::default()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
