//! Errors raised while loading or encoding a Word package.
use crate::common::xml::XmlError;
use crate::ooxml::opc::error::OpcError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OoxmlError>;

#[derive(Error, Debug)]
pub enum OoxmlError {
    /// The container itself could not be read or written
    #[error("package: {0}")]
    Opc(#[from] OpcError),

    /// A story part could not be parsed or encoded
    #[error("XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: XmlError,
    },

    #[error("missing part: {0}")]
    PartNotFound(String),

    /// The main document part is not WordprocessingML
    #[error("main part has content type {got}, expected {expected}")]
    InvalidContentType { expected: String, got: String },

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}
