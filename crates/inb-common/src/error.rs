//! Error types for the INB toolkit.

use thiserror::Error;

/// Result type alias for INB toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the INB toolkit.
#[derive(Error, Debug)]
pub enum Error {
    // Scenario errors (10-19)
    #[error("invalid scenario: {0}")]
    Scenario(String),

    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    // Evaluation errors (20-29)
    #[error("formula domain error: {0}")]
    Domain(String),

    #[error("sweep failed: {0}")]
    Sweep(String),

    #[error("envelope failed: {0}")]
    Envelope(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used as the process exit status on the CLI boundary.
    pub fn code(&self) -> u32 {
        match self {
            Error::Scenario(_) => 10,
            Error::SchemaValidation(_) => 11,
            Error::Domain(_) => 20,
            Error::Sweep(_) => 21,
            Error::Envelope(_) => 22,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}
