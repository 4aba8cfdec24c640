//! Word (.docx) content control filling.
//!
//! This module locates named content controls (`w:sdt`) in the story parts of
//! a Word package and replaces what they display with caller-supplied text.
//!
//! # Architecture
//!
//! The module is organized around these key types:
//! - `ControlMetadata` / `ContentControl`: what identifies a control and where it sits
//! - `LineSequence`: replacement text split into lines
//! - `DocumentPart`: one story part (main document, header or footer) as a tree
//! - `Package`: the .docx package and its searchable story parts
//! - `DocumentSession`: one loaded document with open/fill/serialize/close
//! - `FieldSet` / `fill_template`: ordered field updates applied in one call
//!
//! # Example
//!
//! ```rust,no_run
//! use docx_fill::ooxml::docx::{FieldSet, FillOptions, fill_template};
//!
//! let template = std::fs::read("template.docx")?;
//! let fields = FieldSet::new()
//!     .with("Purpose", Some("Line one\nLine two"))
//!     .with("Mission", None);
//!
//! let filled = fill_template(&template, &fields, &FillOptions::default())?;
//! std::fs::write("filled.docx", filled)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod config;
pub mod content_control;
pub mod fill;
pub mod lines;
pub mod locator;
pub mod package;
pub mod parts;
pub mod rewrite;
pub mod session;
pub mod staging;

#[cfg(test)]
mod testing;

pub use config::{FillOptions, QueryFailurePolicy, StagingOptions};
pub use content_control::{ContentControl, ControlKind, ControlMetadata, ControlType, RunFormatting, matches};
pub use fill::{FieldSet, FieldUpdate, fill_and_stage, fill_template};
pub use lines::{LineSequence, split_lines};
pub use locator::{QueryError, controls, locate};
pub use package::Package;
pub use parts::{DocumentPart, PartKind};
pub use rewrite::rewrite;
pub use session::{DocumentSession, LocatedControl};
pub use staging::StagedDocument;
