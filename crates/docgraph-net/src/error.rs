//! Error types for the client.

use docgraph_core::ConversionError;

use crate::graphql::GraphQLError;

/// Errors returned by client operations.
///
/// Every error goes straight back to the caller. None is retried or
/// swallowed, and none leaves the client unusable for later calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request error: {0}")]
    Request(String),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request deadline passed before a response arrived.
    #[error("Request timed out")]
    Timeout,

    /// Connection refused or failed.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Invalid header name or value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request could not be serialized to JSON.
    #[error("JSON error: {0}")]
    Json(String),

    /// The caller cancelled the request.
    #[error("Request was cancelled")]
    Cancelled,

    /// The server answered with a non-2xx status.
    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The server answered 2xx but reported GraphQL errors.
    #[error("GraphQL errors: {}", join_messages(.errors))]
    GraphQL {
        /// Every error the server reported, in order.
        errors: Vec<GraphQLError>,
    },

    /// The response envelope did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    /// An operation argument was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A document payload did not fit the requested type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Check if this is a transport failure (HTTP status, I/O, deadline, cancellation).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Request(_)
                | Self::InvalidUrl(_)
                | Self::Timeout
                | Self::Connection(_)
                | Self::InvalidHeader(_)
                | Self::Json(_)
                | Self::Cancelled
                | Self::HttpStatus { .. }
        )
    }

    /// Check if the server reported GraphQL errors.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::GraphQL { .. })
    }

    /// Check if the response envelope was malformed.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Check if the typed projection failed.
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion(_))
    }

    /// The HTTP status code, for [`Error::HttpStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The GraphQL errors, for [`Error::GraphQL`].
    pub fn graphql_errors(&self) -> &[GraphQLError] {
        match self {
            Self::GraphQL { errors } => errors,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

/// A specialized Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
