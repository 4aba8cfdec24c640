//! One loaded document, from template bytes to filled bytes.
//!
//! A [`DocumentSession`] owns a freshly parsed package for a single fill
//! operation. Nothing is shared between sessions, so each operation can mutate
//! its tree freely. A session is released by [`DocumentSession::close`], by
//! [`DocumentSession::scoped`] on every exit path, or at the latest on drop.
use crate::common::{Error, Result};
use crate::ooxml::docx::config::{FillOptions, QueryFailurePolicy};
use crate::ooxml::docx::content_control::ContentControl;
use crate::ooxml::docx::fill::FieldSet;
use crate::ooxml::docx::lines::LineSequence;
use crate::ooxml::docx::locator::QueryError;
use crate::ooxml::docx::package::Package;
use crate::ooxml::docx::parts::{DocumentPart, PartKind};
use crate::ooxml::opc::PackURI;
use log::{debug, info, warn};
use std::path::Path;

/// A content control together with the part it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedControl {
    part: PackURI,
    part_kind: PartKind,
    control: ContentControl,
}

impl LocatedControl {
    /// Partname of the story part holding the control.
    #[inline]
    pub fn part(&self) -> &PackURI {
        &self.part
    }

    #[inline]
    pub fn part_kind(&self) -> PartKind {
        self.part_kind
    }

    #[inline]
    pub fn control(&self) -> &ContentControl {
        &self.control
    }
}

impl std::ops::Deref for LocatedControl {
    type Target = ContentControl;

    fn deref(&self) -> &ContentControl {
        &self.control
    }
}

#[derive(Debug)]
enum SessionState {
    Open(Box<Package>),
    Closed,
}

/// A Word document opened for filling.
///
/// # Examples
///
/// ```rust,no_run
/// use docx_fill::ooxml::docx::DocumentSession;
///
/// let template = std::fs::read("template.docx")?;
/// let filled = DocumentSession::scoped(&template, Default::default(), |session| {
///     session.apply_field("Purpose", Some("Line one\nLine two"))?;
///     session.apply_field("Mission", None)?;
///     session.serialize()
/// })?;
/// std::fs::write("filled.docx", filled)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DocumentSession {
    state: SessionState,
    options: FillOptions,
}

impl DocumentSession {
    /// Open a session on template bytes with default options.
    pub fn open(bytes: &[u8]) -> Result<Self> {
        Self::open_with_options(bytes, FillOptions::default())
    }

    /// Open a session on template bytes.
    ///
    /// Fails with [`Error::TemplateLoad`] if the bytes are not a Word package.
    /// No session exists in that case, so there is nothing to close.
    pub fn open_with_options(bytes: &[u8], options: FillOptions) -> Result<Self> {
        let package = Package::from_bytes(bytes, options.include_headers, options.include_footers)
            .map_err(Error::TemplateLoad)?;
        info!(
            "opened document session ({} bytes, {} story parts)",
            bytes.len(),
            package.parts().len()
        );
        Ok(Self {
            state: SessionState::Open(Box::new(package)),
            options,
        })
    }

    /// Open a session on a template file.
    pub fn open_path<P: AsRef<Path>>(path: P, options: FillOptions) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())
            .map_err(|e| Error::TemplateLoad(crate::ooxml::error::OoxmlError::Io(e)))?;
        Self::open_with_options(&bytes, options)
    }

    /// Open a session, run `f` on it, and close the session whatever `f` returns.
    pub fn scoped<T, F>(bytes: &[u8], options: FillOptions, f: F) -> Result<T>
    where
        F: FnOnce(&mut DocumentSession) -> Result<T>,
    {
        let mut session = Self::open_with_options(bytes, options)?;
        let result = f(&mut session);
        session.close();
        result
    }

    #[inline]
    pub fn options(&self) -> &FillOptions {
        &self.options
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    fn package(&self) -> Result<&Package> {
        match &self.state {
            SessionState::Open(package) => Ok(package),
            SessionState::Closed => Err(Error::SessionClosed),
        }
    }

    fn package_mut(&mut self) -> Result<&mut Package> {
        match &mut self.state {
            SessionState::Open(package) => Ok(package),
            SessionState::Closed => Err(Error::SessionClosed),
        }
    }

    /// Every content control of every searched part, in search order.
    ///
    /// Controls with duplicate property or content containers are left out.
    pub fn content_controls(&self) -> Result<Vec<LocatedControl>> {
        let mut all = Vec::new();
        for part in self.package()?.parts() {
            all.extend(part.controls().into_iter().map(|control| located(part, control)));
        }
        Ok(all)
    }

    /// Block-level controls addressed by `identifier`, in search order.
    pub fn locate(&self, identifier: &str) -> Result<Vec<LocatedControl>> {
        let mut found = Vec::new();
        for part in self.package()?.parts() {
            let controls = part
                .locate(identifier)
                .map_err(|reason| query_error(identifier, part, reason))?;
            found.extend(controls.into_iter().map(|control| located(part, control)));
        }
        Ok(found)
    }

    /// The lines each control addressed by `identifier` currently displays.
    pub fn control_lines(&self, identifier: &str) -> Result<Vec<Vec<String>>> {
        let package = self.package()?;
        let mut lines = Vec::new();
        for part in package.parts() {
            let controls = part
                .locate(identifier)
                .map_err(|reason| query_error(identifier, part, reason))?;
            lines.extend(controls.iter().map(|control| part.control_lines(control)));
        }
        Ok(lines)
    }

    /// Fill every control addressed by `identifier` with `text`.
    ///
    /// Absent, empty and whitespace-only text blanks the controls. Returns how
    /// many controls were rewritten; zero when the identifier is not used. A
    /// match nested in another match is replaced with it and not counted.
    pub fn apply_field(&mut self, identifier: &str, text: Option<&str>) -> Result<usize> {
        self.apply_lines(identifier, &LineSequence::normalize(text))
    }

    /// Fill every control addressed by `identifier` with already split lines.
    ///
    /// All parts are queried before any is changed, so a query failure leaves
    /// the document as it was.
    pub fn apply_lines(&mut self, identifier: &str, lines: &LineSequence) -> Result<usize> {
        let package = self.package_mut()?;

        let mut matches = Vec::with_capacity(package.parts().len());
        for part in package.parts() {
            let controls = part
                .locate(identifier)
                .map_err(|reason| query_error(identifier, part, reason))?;
            matches.push(controls);
        }

        let mut count = 0;
        for (part, controls) in package.parts_mut().iter_mut().zip(&matches) {
            if controls.is_empty() {
                continue;
            }
            count += part
                .rewrite_controls(controls, lines)
                .map_err(|reason| query_error(identifier, part, reason))?;
        }

        if count == 0 {
            debug!("field '{}' matches no content control", identifier);
        } else {
            info!(
                "filled field '{}' into {} content control(s) with {} line(s)",
                identifier,
                count,
                lines.len()
            );
        }
        Ok(count)
    }

    /// Apply every field of `fields` in order.
    ///
    /// A query failure aborts or skips the field according to the session's
    /// [`QueryFailurePolicy`]. Returns the total number of controls rewritten.
    pub fn apply_fields(&mut self, fields: &FieldSet) -> Result<usize> {
        let mut total = 0;
        for field in fields.iter() {
            match self.apply_field(&field.id, field.text.as_deref()) {
                Ok(count) => total += count,
                Err(err @ Error::DocumentQuery { .. })
                    if self.options.on_query_failure == QueryFailurePolicy::SkipField =>
                {
                    warn!("skipping field '{}': {}", field.id, err);
                },
                Err(err) => return Err(err),
            }
        }
        Ok(total)
    }

    /// Encode the current document into package bytes.
    ///
    /// Only rewritten parts are re-encoded; every other member of the template
    /// is carried over unchanged. On failure the session stays usable.
    pub fn serialize(&mut self) -> Result<Vec<u8>> {
        let bytes = self.package_mut()?.to_bytes().map_err(Error::Serialization)?;
        debug!("serialized document ({} bytes)", bytes.len());
        Ok(bytes)
    }

    /// Release the loaded document.
    ///
    /// Only the first call releases anything; later calls do nothing. Every
    /// other operation fails with [`Error::SessionClosed`] afterwards.
    pub fn close(&mut self) {
        if let SessionState::Open(_) = std::mem::replace(&mut self.state, SessionState::Closed) {
            info!("closed document session");
        }
    }
}

impl Drop for DocumentSession {
    fn drop(&mut self) {
        if self.is_open() {
            debug!("document session dropped while open");
            self.close();
        }
    }
}

fn located(part: &DocumentPart, control: ContentControl) -> LocatedControl {
    LocatedControl {
        part: part.partname().clone(),
        part_kind: part.kind(),
        control,
    }
}

fn query_error(identifier: &str, part: &DocumentPart, reason: QueryError) -> Error {
    Error::DocumentQuery {
        identifier: identifier.to_string(),
        part: part.partname().to_string(),
        reason,
    }
}
