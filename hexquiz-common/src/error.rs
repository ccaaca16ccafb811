//! Common error types for hexquiz

use thiserror::Error;

/// Common result type for hexquiz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the core components and the HTTP layer
///
/// Every variant is a recoverable, per-request outcome. None of them should
/// terminate the service.
#[derive(Error, Debug)]
pub enum Error {
    /// No taxon matched the query (or a stored record is absent)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream biodiversity API failed: HTTP error, timeout, or malformed payload
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Missing or invalid required input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reading or writing a persisted quiz record failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Short machine-readable code used in structured error responses
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Storage(_) => "STORAGE_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }
}
