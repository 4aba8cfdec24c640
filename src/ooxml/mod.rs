//! Office Open XML (OOXML) package handling for Word documents.
//!
//! The implementation is based on the Open Packaging Conventions (OPC) and
//! follows the structure of the python-docx library, adapted for Rust.
//!
//! # Architecture
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP members, content
//!    types, relationships)
//! 2. **Word Layer** (`docx`): Story parts, content controls and filling
//!
//! # Example: Filling a Word template
//!
//! ```rust,no_run
//! use docx_fill::ooxml::docx::DocumentSession;
//!
//! let template = std::fs::read("template.docx")?;
//! let mut session = DocumentSession::open(&template)?;
//! session.apply_field("Purpose", Some("To fill templates"))?;
//! let filled = session.serialize()?;
//! session.close();
//! # let _ = filled;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;

// Re-export commonly used types from OPC layer
pub use error::{OoxmlError, Result};
pub use opc::{OpcPackage, PackURI};
