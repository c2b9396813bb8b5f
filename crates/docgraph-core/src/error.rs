//! Error types for the typed conversion layer.

/// The typed projection of a document payload failed.
///
/// Carries the path of the offending field inside the payload (for example
/// `price` or `items[2].qty`) and, when the document was part of a search
/// result, its position in that result.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The raw payload could not be written back to JSON.
    #[error("failed to serialize raw payload{}: {source}", at_index(.index))]
    Serialize {
        /// Position of the document in its search result, if any.
        index: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    /// The payload bytes did not fit the requested shape.
    #[error(
        "failed to decode payload field '{path}' into {target}{}: {source}",
        at_index(.index)
    )]
    Deserialize {
        /// Path of the field that failed, `.` for the payload root.
        path: String,
        /// Name of the target type.
        target: &'static str,
        /// Position of the document in its search result, if any.
        index: Option<usize>,
        #[source]
        source: serde_json::Error,
    },
}

fn at_index(index: &Option<usize>) -> String {
    match index {
        Some(index) => format!(" (document at index {index})"),
        None => String::new(),
    }
}

impl ConversionError {
    /// Path of the payload field that failed to decode, if known.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Serialize { .. } => None,
            Self::Deserialize { path, .. } => Some(path),
        }
    }

    /// Position of the failing document inside a search result.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Serialize { index, .. } | Self::Deserialize { index, .. } => *index,
        }
    }

    /// Attach the position of the failing document.
    pub(crate) fn at(mut self, position: usize) -> Self {
        match &mut self {
            Self::Serialize { index, .. } | Self::Deserialize { index, .. } => {
                *index = Some(position);
            }
        }
        self
    }
}
