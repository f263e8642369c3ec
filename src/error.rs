//! Error types for the rendering pipeline

use thiserror::Error;

/// Result type alias for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering a document
#[derive(Error, Debug)]
pub enum Error {
    /// The document breaks a structural invariant (duplicate ids, bad dates)
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Failed to decode or encode a document
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The external font description source failed
    #[error("Font lookup failed: {0}")]
    FontLookup(String),

    /// A backend failed to produce its artifact
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// I/O error (reading documents, writing artifacts)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::RenderError(format!("PDF encoding: {}", err))
    }
}
