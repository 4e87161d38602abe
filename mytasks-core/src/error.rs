//! Errors raised by the task list and its store seam

use thiserror::Error;

/// Boxed cause carried by parse and storage failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Index into the task list, zero-based
    #[error("No task at index {0}")]
    TaskNotFound(usize),

    #[error("Cannot parse {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Store failure: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl CoreError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            source: None,
        }
    }

    pub fn parse_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Storage failure caused by an underlying I/O or encoding error
    pub fn storage_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_with_source("JSON", err)
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_storage_error_keeps_source() {
        let io = std::io::Error::other("disk full");
        let err = CoreError::storage_with_source("write store.json", io);

        assert_eq!(err.to_string(), "Store failure: write store.json");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk full"));
    }

    #[test]
    fn test_validation_message() {
        let err = CoreError::validation("title", "Title is required");
        assert_eq!(err.to_string(), "Invalid title: Title is required");
    }
}
