use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
/// Relationships between a source (a part or the package) and its targets.
///
/// Relationships are read from `.rels` parts and kept in document order, which
/// is also the order Word lists header and footer references in.
use quick_xml::Reader;
use quick_xml::events::Event;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Base URI for resolving relative references
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// The target as written in the `.rels` part.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} targets an external resource",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Ordered collection of relationships from a single source.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: Vec::new(),
        }
    }

    /// Parse the content of a `.rels` part.
    ///
    /// `base_uri` is the directory of the source part, used to resolve targets.
    pub fn from_xml(rels_xml: &[u8], base_uri: &str) -> Result<Self> {
        let mut rels = Self::new(base_uri.to_string());
        let mut reader = Reader::from_reader(rels_xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut r_id = None;
                        let mut reltype = None;
                        let mut target_ref = None;
                        let mut is_external = false;

                        for attr in e.attributes() {
                            let attr = attr?;
                            match attr.key.as_ref() {
                                b"Id" => r_id = Some(attr.unescape_value()?.into_owned()),
                                b"Type" => reltype = Some(attr.unescape_value()?.into_owned()),
                                b"Target" => target_ref = Some(attr.unescape_value()?.into_owned()),
                                b"TargetMode" => {
                                    is_external = attr.unescape_value()? == target_mode::EXTERNAL
                                },
                                _ => {},
                            }
                        }

                        if let (Some(id), Some(rt), Some(tr)) = (r_id, reltype, target_ref) {
                            rels.add_relationship(rt, tr, id, is_external);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Add a relationship to the end of the collection.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> &Relationship {
        self.rels.push(Relationship::new(
            r_id,
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        ));
        &self.rels[self.rels.len() - 1]
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Target partname of the single internal relationship of `reltype`.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<PackURI> {
        let mut matching = self
            .rels
            .iter()
            .filter(|rel| rel.reltype == reltype && !rel.is_external);
        match (matching.next(), matching.next()) {
            (Some(rel), None) => rel.target_partname(),
            (None, _) => Err(OpcError::RelationshipNotFound(reltype.to_string())),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "more than one relationship of type {}",
                reltype
            ))),
        }
    }

    /// Target partnames of every internal relationship of `reltype`, in order.
    ///
    /// A partname targeted twice is reported once.
    pub fn parts_with_reltype(&self, reltype: &str) -> Result<Vec<PackURI>> {
        let mut parts: Vec<PackURI> = Vec::new();
        for rel in self
            .rels
            .iter()
            .filter(|rel| rel.reltype == reltype && !rel.is_external)
        {
            let partname = rel.target_partname()?;
            if !parts.contains(&partname) {
                parts.push(partname);
            }
        }
        Ok(parts)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    const DOCUMENT_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" Target="footer1.xml"/>
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header2.xml"/>
            <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
            <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
            <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>
        </Relationships>"#;

    #[test]
    fn test_parse_keeps_document_order() {
        let rels = Relationships::from_xml(DOCUMENT_RELS, "/word").unwrap();
        assert_eq!(rels.len(), 5);
        let ids: Vec<_> = rels.iter().map(Relationship::r_id).collect();
        assert_eq!(ids, ["rId3", "rId1", "rId2", "rId4", "rId9"]);
    }

    #[test]
    fn test_external_relationship() {
        let rels = Relationships::from_xml(DOCUMENT_RELS, "/word").unwrap();
        let link = rels.get("rId9").unwrap();
        assert!(link.is_external());
        assert_eq!(link.target_ref(), "https://example.com/?a=1&b=2");
        assert!(link.target_partname().is_err());
    }

    #[test]
    fn test_parts_with_reltype() {
        let rels = Relationships::from_xml(DOCUMENT_RELS, "/word").unwrap();
        let headers = rels.parts_with_reltype(rt::HEADER).unwrap();
        let names: Vec<_> = headers.iter().map(PackURI::as_str).collect();
        assert_eq!(names, ["/word/header2.xml", "/word/header1.xml"]);

        assert_eq!(
            rels.part_with_reltype(rt::FOOTER).unwrap().as_str(),
            "/word/footer1.xml"
        );
        assert!(rels.part_with_reltype(rt::HEADER).is_err());
        assert!(matches!(
            rels.part_with_reltype(rt::OFFICE_DOCUMENT),
            Err(OpcError::RelationshipNotFound(_))
        ));
    }
}
