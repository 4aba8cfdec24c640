//! Open Packaging Conventions (OPC) support.
//!
//! Covers the parts of OPC needed to rewrite a package in place:
//!
//! - ZIP-based physical packaging that preserves member order and compression
//! - Content type lookup from `[Content_Types].xml`
//! - Relationship resolution from `.rels` parts
pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};
