//! Errors raised while reading or writing the package container.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("invalid pack URI: {0}")]
    InvalidPackUri(String),

    /// A partname that no package member carries
    #[error("package has no part {0}")]
    PartNotFound(String),

    #[error("no relationship of type {0}")]
    RelationshipNotFound(String),

    /// Neither an `Override` nor a `Default` in `[Content_Types].xml` applies
    #[error("no content type for {0}")]
    ContentTypeNotFound(String),

    #[error("invalid relationship: {0}")]
    InvalidRelationship(String),

    #[error("malformed package XML: {0}")]
    XmlError(String),

    #[error("zip container: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("I/O: {0}")]
    IoError(#[from] std::io::Error),

    #[error("malformed package XML: {0}")]
    QuickXmlError(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    AttrError(String),
}

impl From<quick_xml::events::attributes::AttrError> for OpcError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OpcError::AttrError(err.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for OpcError {
    fn from(err: quick_xml::encoding::EncodingError) -> Self {
        OpcError::XmlError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;
