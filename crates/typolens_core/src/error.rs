//! Scanner error types.

use thiserror::Error;

/// Errors that can occur while building rules or scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The rule's pattern is not a valid regular expression.
    #[error("Invalid pattern for rule '{id}': {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Creates an invalid pattern error.
    pub fn invalid_pattern(id: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            id: id.into(),
            source,
        }
    }
}
