//! Common error types for the mashup catalog

use thiserror::Error;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the catalog crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Payload failed a required-field, type or bound constraint
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Persistence layer could not be reached
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Internal error (e.g. a stored row that no longer parses)
    #[error("Internal error: {0}")]
    Internal(String),
}
