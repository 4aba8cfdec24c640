//! Configuration types for filling content controls.
//!
//! # Examples
//!
//! ```rust
//! use docx_fill::ooxml::docx::{FillOptions, QueryFailurePolicy};
//!
//! // Create with defaults
//! let options = FillOptions::default();
//! assert!(options.include_headers);
//!
//! // Or customize
//! let options = FillOptions::new()
//!     .with_headers(false)
//!     .with_query_failure_policy(QueryFailurePolicy::SkipField);
//!
//! // Or read from YAML
//! let options = FillOptions::from_yaml_str("include_footers: false\non_query_failure: skip_field\n")?;
//! assert!(!options.include_footers);
//! # Ok::<(), docx_fill::Error>(())
//! ```
use crate::common::{Error, Result};
use serde::Deserialize;

/// What to do when the controls for one field cannot be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryFailurePolicy {
    /// Stop the fill and report the failure
    #[default]
    Abort,
    /// Log the failure and continue with the next field
    SkipField,
}

/// Naming of the temporary file a filled document is staged in for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StagingOptions {
    /// Prefix of the temporary file name
    pub prefix: String,
    /// Suffix of the temporary file name, including the extension
    pub suffix: String,
    /// File name offered to whoever downloads the document
    pub download_name: String,
}

impl Default for StagingOptions {
    fn default() -> Self {
        Self {
            prefix: "updated-template".to_string(),
            suffix: ".docx".to_string(),
            download_name: "updated-template.docx".to_string(),
        }
    }
}

/// Options for a fill operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FillOptions {
    /// Whether controls in header parts are filled
    pub include_headers: bool,
    /// Whether controls in footer parts are filled
    pub include_footers: bool,
    pub on_query_failure: QueryFailurePolicy,
    pub staging: StagingOptions,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            include_headers: true,
            include_footers: true,
            on_query_failure: QueryFailurePolicy::Abort,
            staging: StagingOptions::default(),
        }
    }
}

impl FillOptions {
    /// Create a new `FillOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from YAML; missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Config(format!("fill options: {}", e)))
    }

    /// Set whether header parts are searched.
    #[inline]
    pub fn with_headers(mut self, include: bool) -> Self {
        self.include_headers = include;
        self
    }

    /// Set whether footer parts are searched.
    #[inline]
    pub fn with_footers(mut self, include: bool) -> Self {
        self.include_footers = include;
        self
    }

    #[inline]
    pub fn with_query_failure_policy(mut self, policy: QueryFailurePolicy) -> Self {
        self.on_query_failure = policy;
        self
    }

    #[inline]
    pub fn with_staging(mut self, staging: StagingOptions) -> Self {
        self.staging = staging;
        self
    }
}
