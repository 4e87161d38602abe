//! Errors surfaced by the `mytasks` binary

use std::io;

use mytasks_core::CoreError;
use mytasks_core::error::BoxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// 1-based position as the user typed it
    #[error("There is no task #{0}")]
    TaskNotFound(usize),

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot parse {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Could not save: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Terminal error: {context}")]
    Terminal {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    pub fn config_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Config {
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

    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn terminal(context: impl Into<String>, source: io::Error) -> Self {
        Self::Terminal {
            context: context.into(),
            source,
        }
    }
}

impl From<confy::ConfyError> for CliError {
    fn from(err: confy::ConfyError) -> Self {
        Self::config_with_source("cannot load config file", err)
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            // Core indices are zero-based, command-line positions are not
            CoreError::TaskNotFound(index) => Self::TaskNotFound(index + 1),
            CoreError::Parse { message, source } => Self::Parse { message, source },
            CoreError::Validation { field, message } => Self::Validation { field, message },
            CoreError::Storage { message, source } => Self::Storage { message, source },
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
