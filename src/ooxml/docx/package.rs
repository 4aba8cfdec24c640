//! Package implementation for Word documents.
use crate::ooxml::docx::parts::{DocumentPart, PartKind};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::{OpcPackage, PackURI};
use log::debug;
use std::path::Path;

/// A Word (.docx) package opened for filling.
///
/// Wraps an OPC package and holds the story parts whose content controls can
/// be searched, in search order: headers, the main document, then footers.
/// Headers and footers are each ordered by the number in their partname.
#[derive(Debug)]
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
    parts: Vec<DocumentPart>,
}

impl Package {
    /// Open a .docx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P, include_headers: bool, include_footers: bool) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data, include_headers, include_footers)
    }

    /// Open a .docx package from its bytes.
    ///
    /// Fails if the bytes are not a package, the main document part is missing
    /// or is not WordprocessingML, or a story part is not well-formed XML.
    pub fn from_bytes(data: &[u8], include_headers: bool, include_footers: bool) -> Result<Self> {
        let opc = OpcPackage::from_bytes(data)?;

        let main = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main document part: {}", e)))?;
        if !opc.contains_part(&main) {
            return Err(OoxmlError::PartNotFound(main.to_string()));
        }

        // Verify it's a Word document by checking the main part's content type
        let content_type = opc.content_type(&main)?;
        if !ct::WML_MAIN_PARTS.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::WML_DOCUMENT_MAIN.to_string(),
                got: content_type.to_string(),
            });
        }

        let main_rels = opc.part_rels(&main)?;
        let mut parts = Vec::new();

        if include_headers {
            for partname in story_parts(&opc, main_rels.parts_with_reltype(rt::HEADER)?) {
                parts.push(load_part(&opc, partname, PartKind::Header)?);
            }
        }
        parts.push(load_part(&opc, main, PartKind::Main)?);
        if include_footers {
            for partname in story_parts(&opc, main_rels.parts_with_reltype(rt::FOOTER)?) {
                parts.push(load_part(&opc, partname, PartKind::Footer)?);
            }
        }

        debug!(
            "opened package with {} members and {} story parts",
            opc.members().len(),
            parts.len()
        );
        Ok(Self { opc, parts })
    }

    /// Story parts in search order.
    #[inline]
    pub fn parts(&self) -> &[DocumentPart] {
        &self.parts
    }

    #[inline]
    pub fn parts_mut(&mut self) -> &mut [DocumentPart] {
        &mut self.parts
    }

    /// The main document part.
    pub fn main_part(&self) -> Option<&DocumentPart> {
        self.parts.iter().find(|part| part.kind() == PartKind::Main)
    }

    #[inline]
    pub fn opc(&self) -> &OpcPackage {
        &self.opc
    }

    /// Encode the package, re-encoding only the story parts that were rewritten.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        for part in self.parts.iter().filter(|part| part.is_dirty()) {
            let xml = part.to_xml()?;
            debug!("re-encoded {} ({} bytes)", part.partname(), xml.len());
            self.opc.replace_blob(part.partname(), xml)?;
        }
        Ok(self.opc.to_bytes()?)
    }
}

/// Order referenced story parts by partname index, dropping dangling references.
fn story_parts(opc: &OpcPackage, mut partnames: Vec<PackURI>) -> Vec<PackURI> {
    partnames.retain(|partname| {
        let present = opc.contains_part(partname);
        if !present {
            debug!("skipping missing story part {}", partname);
        }
        present
    });
    partnames.sort_by_key(|partname| (partname.idx().unwrap_or(0), partname.clone()));
    partnames
}

fn load_part(opc: &OpcPackage, partname: PackURI, kind: PartKind) -> Result<DocumentPart> {
    let blob = opc.blob(&partname)?;
    DocumentPart::load(partname, kind, blob)
}
