//! Unified error types for docx-fill.
//!
//! This module provides the error taxonomy reported to callers of the fill
//! engine. Lower layers (OPC, XML tree) keep their own error enums; they are
//! wrapped here together with the context of the failing operation.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
