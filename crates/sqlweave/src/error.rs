//! Error types for sqlweave

use thiserror::Error;

/// Result type alias for sqlweave operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for building and rendering statements
#[derive(Debug, Error)]
pub enum SqlError {
    /// Structurally invalid input (unknown operation, missing table, bad operand...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No dialect registered under the given name
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// Configuration read/parse error
    #[error("Config error: {0}")]
    Config(String),
}

impl SqlError {
    /// Create an invalid argument error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an unknown dialect error
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self::UnknownDialect(name.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is an unknown dialect error
    pub fn is_unknown_dialect(&self) -> bool {
        matches!(self, Self::UnknownDialect(_))
    }
}
