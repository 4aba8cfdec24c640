//! Field sets and one-call template filling.
//!
//! A [`FieldSet`] is an ordered list of `(identifier, text)` updates. Fields
//! are applied in order, so when two fields address the same control the later
//! one wins.
//!
//! # Examples
//!
//! ```rust
//! use docx_fill::ooxml::docx::FieldSet;
//!
//! let fields = FieldSet::from_yaml_str(
//!     "fields:\n  - id: Purpose\n    text: \"Line one\\nLine two\"\n  - id: Mission\n",
//! )?;
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields.iter().nth(1).and_then(|f| f.text.as_deref()), None);
//! # Ok::<(), docx_fill::Error>(())
//! ```
use crate::common::{Error, Result};
use crate::ooxml::docx::config::FillOptions;
use crate::ooxml::docx::session::DocumentSession;
use crate::ooxml::docx::staging::StagedDocument;
use serde::Deserialize;

/// Text for the controls addressed by one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldUpdate {
    /// Alias or tag of the controls to fill
    pub id: String,
    /// Replacement text; absent text blanks the controls
    #[serde(default)]
    pub text: Option<String>,
}

impl FieldUpdate {
    pub fn new(id: impl Into<String>, text: Option<&str>) -> Self {
        Self {
            id: id.into(),
            text: text.map(str::to_string),
        }
    }
}

/// Ordered field updates for one fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldSet {
    fields: Vec<FieldUpdate>,
}

impl FieldSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a field set from a YAML document with a `fields` list.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Config(format!("field set: {}", e)))
    }

    /// Append a field.
    pub fn push(&mut self, id: impl Into<String>, text: Option<&str>) {
        self.fields.push(FieldUpdate::new(id, text));
    }

    /// Append a field, builder style.
    pub fn with(mut self, id: impl Into<String>, text: Option<&str>) -> Self {
        self.push(id, text);
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldUpdate> {
        self.fields.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldUpdate> for FieldSet {
    fn from_iter<I: IntoIterator<Item = FieldUpdate>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldUpdate;
    type IntoIter = std::slice::Iter<'a, FieldUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Fill `fields` into a template and return the filled package bytes.
///
/// The session is closed before returning, on success and on failure.
pub fn fill_template(template: &[u8], fields: &FieldSet, options: &FillOptions) -> Result<Vec<u8>> {
    DocumentSession::scoped(template, options.clone(), |session| {
        session.apply_fields(fields)?;
        session.serialize()
    })
}

/// Fill a template and stage the result in a temporary file for delivery.
pub fn fill_and_stage(template: &[u8], fields: &FieldSet, options: &FillOptions) -> Result<StagedDocument> {
    let bytes = fill_template(template, fields, options)?;
    StagedDocument::stage(&bytes, &options.staging)
}
