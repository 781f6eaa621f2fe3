//! Error types for spatialkit

use thiserror::Error;

/// Main error type for spatialkit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("{operation} does not support {found} geometry")]
    UnsupportedGeometry {
        operation: &'static str,
        found: String,
    },

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Missing property: {0}")]
    MissingProperty(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for [`Error::InvalidParameter`]
    pub fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::UnsupportedGeometry`]
    pub fn unsupported(operation: &'static str, found: impl Into<String>) -> Self {
        Error::UnsupportedGeometry {
            operation,
            found: found.into(),
        }
    }
}

/// Result type alias for spatialkit operations
pub type Result<T> = std::result::Result<T, Error>;
