//! Error types for the calvox ecosystem.

use thiserror::Error;

/// Errors that can occur in calvox operations.
#[derive(Error, Debug)]
pub enum CalvoxError {
    /// The language model returned something that does not parse into a
    /// suggestion. Fatal for the current request, never retried.
    #[error("Intent extraction failed: {0}")]
    Extraction(String),

    /// The calendar provider rejected or failed a call.
    #[error("Calendar provider error: {0}")]
    Provider(String),

    /// Missing or invalid provider credentials for the current user.
    #[error("Not authenticated: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A request body or payload did not have the expected shape.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calvox operations.
pub type CalvoxResult<T> = Result<T, CalvoxError>;
