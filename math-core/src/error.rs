//! Error types for the math service core

use thiserror::Error;

/// Main error type for math operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Divide was called with a zero divisor
    #[error("Division by zero is not allowed")]
    DivisionByZero,

    /// Unknown operation name
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Store configuration rejected before opening
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem error around the store file
    #[error("IO error: {0}")]
    Io(String),

    /// SQLite failure while opening, migrating or writing
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for MathError {
    fn from(err: rusqlite::Error) -> Self {
        MathError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for MathError {
    fn from(err: std::io::Error) -> Self {
        MathError::Io(err.to_string())
    }
}

/// Result type alias for math operations
pub type Result<T> = std::result::Result<T, MathError>;
