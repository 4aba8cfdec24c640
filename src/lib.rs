//! docx-fill - Fill named content controls in Word (.docx) templates
//!
//! This library opens a Word package, finds the block-level content controls
//! addressed by alias or tag, and replaces what they display with plain text,
//! one run per line. Everything else in the package is carried over as it was.
//!
//! # Features
//!
//! - **Content control lookup**: Match controls by alias or tag in document order
//! - **Line-aware rewriting**: Multi-line text becomes runs separated by line breaks
//! - **Formatting kept**: New runs reuse the control's declared run formatting
//! - **Headers and footers**: Search story parts beyond the main document
//! - **Scoped sessions**: Each fill loads its own tree and releases it on every exit path
//! - **Minimal re-encoding**: Untouched package members are copied byte for byte
//!
//! # Example - Filling a template
//!
//! ```no_run
//! use docx_fill::ooxml::docx::{FieldSet, FillOptions, fill_template};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let template = std::fs::read("template.docx")?;
//! let fields = FieldSet::from_yaml_str(&std::fs::read_to_string("fields.yaml")?)?;
//! let options = FillOptions::from_yaml_str(&std::fs::read_to_string("options.yaml")?)?;
//!
//! let filled = fill_template(&template, &fields, &options)?;
//! std::fs::write("filled.docx", filled)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Working with a session
//!
//! ```no_run
//! use docx_fill::DocumentSession;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let template = std::fs::read("template.docx")?;
//! let filled = DocumentSession::scoped(&template, Default::default(), |session| {
//!     for control in session.content_controls()? {
//!         println!("{:?} {:?} in {}", control.alias(), control.tag(), control.part());
//!     }
//!     session.apply_field("Purpose", Some("  Line one\nLine two  \n"))?;
//!     session.serialize()
//! })?;
//! std::fs::write("filled.docx", filled)?;
//! # Ok(())
//! # }
//! ```

/// Shared error types and XML tree
pub mod common;

/// OOXML (Office Open XML) package handling and content control filling
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use ooxml::docx::{
    DocumentSession, FieldSet, FieldUpdate, FillOptions, LineSequence, QueryFailurePolicy, StagedDocument,
    fill_and_stage, fill_template,
};
