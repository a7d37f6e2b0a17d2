//! Error types for matrix construction

use thiserror::Error;

/// Result type alias for matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

/// Errors raised while loading daily tables or building matrices
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Invalid argument: {name} = {value}, {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MatrixError {
    pub(crate) fn invalid_argument(
        name: &str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        MatrixError::InvalidArgument {
            name: name.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<polars::error::PolarsError> for MatrixError {
    fn from(err: polars::error::PolarsError) -> Self {
        MatrixError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for MatrixError {
    fn from(err: serde_json::Error) -> Self {
        MatrixError::Config(err.to_string())
    }
}
