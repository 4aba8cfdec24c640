//! Content control support for Word documents.
//!
//! Content controls (`w:sdt`) are named placeholder regions. Each carries its
//! metadata in `w:sdtPr` and its displayed content in `w:sdtContent`. The shape
//! of the content depends on where the control sits: around paragraphs, around
//! runs inside a paragraph, around table rows, or around table cells.
use crate::common::xml::{NodePath, XmlElement};
use crate::ooxml::opc::constants::namespace::WML_MAIN;
use std::sync::Arc;

/// Where a content control sits, and therefore what its content holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Wraps paragraphs and tables (`CT_SdtBlock`)
    Block,
    /// Wraps runs inside a paragraph (`CT_SdtRun`)
    Run,
    /// Wraps table rows (`CT_SdtRow`)
    Row,
    /// Wraps table cells (`CT_SdtCell`)
    Cell,
}

/// The control type declared in `w:sdtPr`.
///
/// Recorded for inspection only; it does not affect matching or rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlType {
    /// No type element, or an explicit `w:richText`
    RichText,
    /// `w:text`
    PlainText,
    Date,
    DropDownList,
    ComboBox,
    Picture,
    /// `w14:checkbox`
    Checkbox,
    Group,
    /// Any other type element, such as `w:docPartObj` or `w:citation`
    Other,
}

impl ControlType {
    fn from_local_name(name: &str) -> Option<Self> {
        Some(match name {
            "richText" => ControlType::RichText,
            "text" => ControlType::PlainText,
            "date" => ControlType::Date,
            "dropDownList" => ControlType::DropDownList,
            "comboBox" => ControlType::ComboBox,
            "picture" => ControlType::Picture,
            "checkbox" => ControlType::Checkbox,
            "group" => ControlType::Group,
            "docPartObj" | "docPartList" | "citation" | "bibliography" | "equation" => {
                ControlType::Other
            },
            _ => return None,
        })
    }
}

/// Default run properties declared by a control (`w:sdtPr/w:rPr`).
///
/// Cloning shares the underlying element; new runs created for the control
/// hold the very same element rather than a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFormatting(Arc<XmlElement>);

impl RunFormatting {
    pub fn new(properties: Arc<XmlElement>) -> Self {
        Self(properties)
    }

    /// The `w:rPr` element.
    #[inline]
    pub fn properties(&self) -> &XmlElement {
        &self.0
    }

    /// The shared handle, for placing into a run.
    #[inline]
    pub fn shared(&self) -> &Arc<XmlElement> {
        &self.0
    }

    /// Check whether `element` is this very descriptor rather than an equal copy.
    #[inline]
    pub fn is_same(&self, element: &Arc<XmlElement>) -> bool {
        Arc::ptr_eq(&self.0, element)
    }
}

/// Metadata declared by a content control.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlMetadata {
    /// `w:id`
    id: Option<i64>,
    /// `w:alias`, the friendly name shown in Word
    alias: Option<String>,
    /// `w:tag`
    tag: Option<String>,
    control_type: Option<ControlType>,
    run_formatting: Option<RunFormatting>,
    lock_delete: bool,
    lock_content: bool,
}

impl ControlMetadata {
    /// Metadata with only an alias and a tag, as used for matching.
    pub fn new(alias: Option<&str>, tag: Option<&str>) -> Self {
        Self {
            alias: alias.map(str::to_string),
            tag: tag.map(str::to_string),
            ..Self::default()
        }
    }

    /// Read metadata from a `w:sdtPr` element.
    ///
    /// An alias or tag element without a `w:val` attribute counts as unset.
    pub fn from_properties(sdt_pr: &XmlElement) -> Self {
        let mut metadata = Self::default();

        for child in sdt_pr.child_elements() {
            let in_wml = child.namespace() == Some(WML_MAIN);
            match child.local_name() {
                "id" if in_wml => {
                    metadata.id = child
                        .attribute("val")
                        .and_then(|v| atoi_simd::parse::<i64>(v.trim().as_bytes()).ok());
                },
                "alias" if in_wml => metadata.alias = child.attribute("val").map(|v| v.into_owned()),
                "tag" if in_wml => metadata.tag = child.attribute("val").map(|v| v.into_owned()),
                "rPr" if in_wml => {
                    metadata.run_formatting = sdt_pr
                        .find_child_shared(WML_MAIN, "rPr")
                        .map(|rpr| RunFormatting::new(Arc::clone(rpr)));
                },
                "lock" if in_wml => {
                    if let Some(val) = child.attribute("val") {
                        match val.as_ref() {
                            "sdtLocked" => metadata.lock_delete = true,
                            "contentLocked" => metadata.lock_content = true,
                            "sdtContentLocked" => {
                                metadata.lock_delete = true;
                                metadata.lock_content = true;
                            },
                            _ => {},
                        }
                    }
                },
                name => {
                    if metadata.control_type.is_none() {
                        metadata.control_type = ControlType::from_local_name(name);
                    }
                },
            }
        }

        metadata
    }

    #[inline]
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    #[inline]
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Declared control type; rich text when none is declared.
    #[inline]
    pub fn control_type(&self) -> ControlType {
        self.control_type.unwrap_or(ControlType::RichText)
    }

    #[inline]
    pub fn run_formatting(&self) -> Option<&RunFormatting> {
        self.run_formatting.as_ref()
    }

    /// Whether the control itself may not be deleted.
    #[inline]
    pub fn is_lock_delete(&self) -> bool {
        self.lock_delete
    }

    /// Whether the content is locked against editing in Word.
    #[inline]
    pub fn is_lock_content(&self) -> bool {
        self.lock_content
    }

    /// See [`matches`].
    #[inline]
    pub fn matches(&self, target: &str) -> bool {
        matches(self, target)
    }
}

/// Decide whether a control addresses `target`.
///
/// True iff the alias or the tag equals `target` exactly. An unset alias or tag
/// never matches, not even an empty `target`.
///
/// # Examples
///
/// ```
/// use docx_fill::ooxml::docx::{ControlMetadata, matches};
///
/// let metadata = ControlMetadata::new(Some("Purpose of the project"), Some("Purpose"));
/// assert!(matches(&metadata, "Purpose"));
/// assert!(matches(&metadata, "Purpose of the project"));
/// assert!(!matches(&metadata, "purpose"));
/// assert!(!matches(&ControlMetadata::new(None, None), ""));
/// ```
#[inline]
pub fn matches(metadata: &ControlMetadata, target: &str) -> bool {
    metadata.alias.as_deref() == Some(target) || metadata.tag.as_deref() == Some(target)
}

/// A content control found in a part.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentControl {
    kind: ControlKind,
    metadata: ControlMetadata,
    /// Child-index path from the part's root element to the `w:sdt` element
    path: NodePath,
}

impl ContentControl {
    pub fn new(kind: ControlKind, metadata: ControlMetadata, path: NodePath) -> Self {
        Self {
            kind,
            metadata,
            path,
        }
    }

    #[inline]
    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// Whether the control wraps paragraphs, the only shape that is rewritten.
    #[inline]
    pub fn is_block(&self) -> bool {
        self.kind == ControlKind::Block
    }

    #[inline]
    pub fn metadata(&self) -> &ControlMetadata {
        &self.metadata
    }

    #[inline]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    #[inline]
    pub fn id(&self) -> Option<i64> {
        self.metadata.id
    }

    #[inline]
    pub fn alias(&self) -> Option<&str> {
        self.metadata.alias()
    }

    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.metadata.tag()
    }

    #[inline]
    pub fn control_type(&self) -> ControlType {
        self.metadata.control_type()
    }

    #[inline]
    pub fn run_formatting(&self) -> Option<&RunFormatting> {
        self.metadata.run_formatting()
    }
}
