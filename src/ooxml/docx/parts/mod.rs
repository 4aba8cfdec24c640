//! Part implementations for Word documents.
//!
//! The story parts (main document, headers, footers) are the parts whose
//! content controls can be filled.
pub mod document_part;

pub use document_part::{DocumentPart, PartKind};
