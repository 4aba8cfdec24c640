//! Unified error types for docx-fill.
//!
//! Every failure a caller can observe maps to one of these variants. A field
//! whose identifier matches no content control is not an error.
use crate::ooxml::docx::QueryError;
use crate::ooxml::error::OoxmlError;
use thiserror::Error;

/// Main error type for fill operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The template bytes are not an openable Word package, or the main
    /// document part is missing or unreadable
    #[error("Failed to load template: {0}")]
    TemplateLoad(#[source] OoxmlError),

    /// Content controls could not be queried for a field
    #[error("Failed to query content controls for '{identifier}' in {part}: {reason}")]
    DocumentQuery {
        identifier: String,
        part: String,
        #[source]
        reason: QueryError,
    },

    /// The mutated document could not be encoded back into a package
    #[error("Failed to serialize document: {0}")]
    Serialization(#[source] OoxmlError),

    /// Releasing a handle or temporary artifact failed
    #[error("Failed to release resources: {0}")]
    ResourceCleanup(#[source] std::io::Error),

    /// Writing a staged copy for delivery failed
    #[error("Failed to stage document: {0}")]
    Staging(#[source] std::io::Error),

    /// The session was already closed
    #[error("Document session is closed")]
    SessionClosed,

    /// Fill options or a field manifest could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Identifier of the field being processed, when the failure is tied to one.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Error::DocumentQuery { identifier, .. } => Some(identifier),
            _ => None,
        }
    }
}

/// Result type for fill operations.
pub type Result<T> = std::result::Result<T, Error>;
