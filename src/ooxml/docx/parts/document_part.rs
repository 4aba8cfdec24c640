//! DocumentPart - a WordprocessingML story part held as a mutable tree.
use crate::common::xml::{XmlDocument, XmlElement};
use crate::ooxml::docx::content_control::ContentControl;
use crate::ooxml::docx::lines::LineSequence;
use crate::ooxml::docx::locator::{self, QueryError};
use crate::ooxml::docx::rewrite::rewrite;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::PackURI;
use crate::ooxml::opc::constants::namespace::WML_MAIN;

/// Which story a part holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// The main document (`/word/document.xml`)
    Main,
    Header,
    Footer,
}

/// A story part of a Word document: the main document, a header or a footer.
///
/// The part's XML is parsed once into a tree. Rewrites mutate the tree and mark
/// the part dirty; only dirty parts are encoded again on save.
#[derive(Debug)]
pub struct DocumentPart {
    partname: PackURI,
    kind: PartKind,
    tree: XmlDocument,
    dirty: bool,
}

impl DocumentPart {
    /// Parse a part from its blob.
    pub fn load(partname: PackURI, kind: PartKind, blob: &[u8]) -> Result<Self> {
        let tree = XmlDocument::parse(blob).map_err(|source| OoxmlError::Xml {
            part: partname.to_string(),
            source,
        })?;
        Ok(Self {
            partname,
            kind,
            tree,
            dirty: false,
        })
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    #[inline]
    pub fn kind(&self) -> PartKind {
        self.kind
    }

    /// Whether the part was rewritten since it was loaded.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn tree(&self) -> &XmlDocument {
        &self.tree
    }

    /// Every content control in the part, in document order.
    pub fn controls(&self) -> Vec<ContentControl> {
        locator::controls(self.tree.root())
    }

    /// Block-level controls whose alias or tag equals `identifier`.
    pub fn locate(&self, identifier: &str) -> std::result::Result<Vec<ContentControl>, QueryError> {
        locator::locate(self.tree.root(), identifier)
    }

    /// Rewrite the given controls of this part to display `lines`.
    ///
    /// `controls` must come from [`DocumentPart::locate`] on the current tree.
    /// They are applied last to first, so a rewrite never shifts the path of a
    /// control still waiting to be rewritten. A control nested in another of
    /// `controls` is replaced along with it, so it is neither rewritten nor
    /// counted. Returns how many controls were rewritten.
    pub fn rewrite_controls(
        &mut self,
        controls: &[ContentControl],
        lines: &LineSequence,
    ) -> std::result::Result<usize, QueryError> {
        let mut outermost: Vec<&ContentControl> = Vec::with_capacity(controls.len());
        for control in controls {
            let nested = outermost
                .iter()
                .any(|outer| control.path().len() > outer.path().len() && control.path().starts_with(outer.path()));
            if !nested {
                outermost.push(control);
            }
        }

        for control in outermost.iter().rev() {
            let sdt = self
                .tree
                .root_mut()
                .descendant_mut(control.path())
                .filter(|e| e.is(WML_MAIN, "sdt"))
                .ok_or_else(|| QueryError::MissingNode {
                    path: control.path().to_vec(),
                })?;
            rewrite(sdt, lines);
            self.dirty = true;
        }
        Ok(outermost.len())
    }

    /// The lines a block-level control currently displays.
    ///
    /// Paragraphs and `w:br` / `w:cr` elements end a line.
    pub fn control_lines(&self, control: &ContentControl) -> Vec<String> {
        let Some(content) = self
            .tree
            .root()
            .descendant(control.path())
            .and_then(|sdt| sdt.find_child(WML_MAIN, "sdtContent"))
        else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        for paragraph in content.child_elements().filter(|e| e.is(WML_MAIN, "p")) {
            let mut current = String::new();
            collect_lines(paragraph, &mut current, &mut lines);
            lines.push(current);
        }
        lines
    }

    /// Encode the tree back into XML.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        self.tree.to_bytes().map_err(|source| OoxmlError::Xml {
            part: self.partname.to_string(),
            source,
        })
    }
}

fn collect_lines(element: &XmlElement, current: &mut String, lines: &mut Vec<String>) {
    for child in element.child_elements() {
        if child.namespace() != Some(WML_MAIN) {
            collect_lines(child, current, lines);
            continue;
        }
        match child.local_name() {
            "t" => current.push_str(&child.text()),
            "tab" => current.push('\t'),
            "br" | "cr" => lines.push(std::mem::take(current)),
            "pPr" | "rPr" | "sdtPr" | "delText" | "instrText" => {},
            _ => collect_lines(child, current, lines),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
        r#"<w:sdt><w:sdtPr><w:tag w:val="Purpose"/></w:sdtPr><w:sdtContent>"#,
        r#"<w:p><w:r><w:t>Enter the purpose</w:t></w:r></w:p></w:sdtContent></w:sdt>"#,
        r#"<w:sdt><w:sdtPr><w:tag w:val="Purpose"/></w:sdtPr><w:sdtContent>"#,
        r#"<w:p><w:r><w:t>again</w:t></w:r><w:r><w:tab/><w:t>tabbed</w:t><w:br/><w:t>next</w:t></w:r></w:p>"#,
        r#"<w:p/></w:sdtContent></w:sdt>"#,
        r#"</w:body></w:document>"#
    );

    fn part() -> DocumentPart {
        let partname = PackURI::new("/word/document.xml").unwrap();
        DocumentPart::load(partname, PartKind::Main, DOCUMENT.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_error_names_the_part() {
        let partname = PackURI::new("/word/header1.xml").unwrap();
        let err = DocumentPart::load(partname, PartKind::Header, b"<w:hdr>").unwrap_err();
        assert!(err.to_string().contains("/word/header1.xml"));
    }

    #[test]
    fn test_control_lines() {
        let part = part();
        let found = part.locate("Purpose").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(part.control_lines(&found[0]), ["Enter the purpose"]);
        assert_eq!(part.control_lines(&found[1]), ["again\ttabbed", "next", ""]);
    }

    #[test]
    fn test_rewrite_all_matches_marks_dirty() {
        let mut part = part();
        assert!(!part.is_dirty());
        let found = part.locate("Purpose").unwrap();
        let lines = LineSequence::normalize(Some("first\nsecond"));

        assert_eq!(part.rewrite_controls(&found, &lines).unwrap(), 2);
        assert!(part.is_dirty());

        for control in part.locate("Purpose").unwrap() {
            assert_eq!(part.control_lines(&control), ["first", "second"]);
        }
    }

    #[test]
    fn test_rewrite_nothing_stays_clean() {
        let mut part = part();
        let found = part.locate("Mission").unwrap();
        assert_eq!(part.rewrite_controls(&found, &LineSequence::default()).unwrap(), 0);
        assert!(!part.is_dirty());
        assert_eq!(part.to_xml().unwrap(), DOCUMENT.as_bytes());
    }

    #[test]
    fn test_stale_path_is_reported() {
        let mut part = part();
        let found = part.locate("Purpose").unwrap();
        let stale = ContentControl::new(
            found[0].kind(),
            found[0].metadata().clone(),
            smallvec::smallvec![0, 9],
        );
        assert!(matches!(
            part.rewrite_controls(&[stale], &LineSequence::default()),
            Err(QueryError::MissingNode { .. })
        ));
    }

    #[test]
    fn test_nested_match_is_replaced_with_its_parent() {
        let xml = concat!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
            r#"<w:sdt><w:sdtPr><w:tag w:val="Purpose"/></w:sdtPr><w:sdtContent>"#,
            r#"<w:sdt><w:sdtPr><w:tag w:val="Purpose"/></w:sdtPr><w:sdtContent><w:p/></w:sdtContent></w:sdt>"#,
            r#"</w:sdtContent></w:sdt></w:body></w:document>"#
        );
        let partname = PackURI::new("/word/document.xml").unwrap();
        let mut part = DocumentPart::load(partname, PartKind::Main, xml.as_bytes()).unwrap();
        let found = part.locate("Purpose").unwrap();
        assert_eq!(found.len(), 2);

        let count = part
            .rewrite_controls(&found, &LineSequence::normalize(Some("only")))
            .unwrap();
        assert_eq!(count, 1);

        let left = part.locate("Purpose").unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(part.control_lines(&left[0]), ["only"]);
    }
}
