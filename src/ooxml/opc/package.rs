//! The in-memory OPC package.
//!
//! OpcPackage keeps every member of the source archive, in order, and layers
//! content type and relationship lookups on top. Parts are exposed as raw
//! blobs; replacing a blob marks the only difference the writer will emit.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{PackageMember, PhysPkgReader};
use crate::ooxml::opc::pkgreader::ContentTypeMap;
use crate::ooxml::opc::pkgwriter::PackageWriter;
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;
use std::path::Path;

/// Main API class for working with OPC packages.
#[derive(Debug)]
pub struct OpcPackage {
    /// Every archive member, in archive order
    members: Vec<PackageMember>,

    /// Member name to position in `members`; the first occurrence wins
    index: HashMap<String, usize>,

    content_types: ContentTypeMap,

    /// Package-level relationships
    rels: Relationships,
}

impl OpcPackage {
    /// Open an OPC package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load an OPC package from the bytes of a ZIP archive.
    ///
    /// Fails if the archive is unreadable or has no `[Content_Types].xml`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let members = PhysPkgReader::read_all(data)?;

        let mut index = HashMap::with_capacity(members.len());
        for (pos, member) in members.iter().enumerate() {
            if !member.is_dir() {
                index.entry(member.name().to_string()).or_insert(pos);
            }
        }

        let mut package = Self {
            members,
            index,
            content_types: ContentTypeMap::default(),
            rels: Relationships::default(),
        };

        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        package.content_types = ContentTypeMap::from_xml(package.blob(&content_types_uri)?)?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        package.rels = package.part_rels(&package_uri)?;

        Ok(package)
    }

    /// Partname of the main document, from the package's officeDocument relationship.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        self.rels.part_with_reltype(relationship_type::OFFICE_DOCUMENT)
    }

    /// Content type of a part.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        self.content_types.get(partname)
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.index.contains_key(partname.membername())
    }

    /// Binary content of a part.
    pub fn blob(&self, partname: &PackURI) -> Result<&[u8]> {
        self.index
            .get(partname.membername())
            .map(|&pos| self.members[pos].data())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Replace the content of an existing part.
    pub fn replace_blob(&mut self, partname: &PackURI, blob: Vec<u8>) -> Result<()> {
        let pos = *self
            .index
            .get(partname.membername())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))?;
        self.members[pos].set_data(blob);
        Ok(())
    }

    /// Relationships whose source is `partname`; empty if it has no `.rels` part.
    pub fn part_rels(&self, partname: &PackURI) -> Result<Relationships> {
        match self.blob(&partname.rels_uri()) {
            Ok(xml) => Relationships::from_xml(xml, partname.base_uri()),
            Err(OpcError::PartNotFound(_)) => Ok(Relationships::new(partname.base_uri().to_string())),
            Err(e) => Err(e),
        }
    }

    /// Package-level relationships.
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Every archive member, in archive order.
    pub fn members(&self) -> &[PackageMember] {
        &self.members
    }

    /// Names of the archive members, in archive order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(PackageMember::name)
    }

    /// Serialize the package back into a ZIP archive.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        PackageWriter::to_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn create_minimal_docx() -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();

            writer.start_file("[Content_Types].xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#).unwrap();

            writer.start_file("_rels/.rels", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#).unwrap();

            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(br#"<?xml version="1.0"?>
<document xmlns="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <body><p><t>Test</t></p></body>
</document>"#).unwrap();

            let stored = options.compression_method(zip::CompressionMethod::Stored);
            writer.start_file("word/media/image1.png", stored).unwrap();
            writer.write_all(b"\x89PNG\r\n").unwrap();

            writer.finish().unwrap();
        }
        zip_data
    }

    #[test]
    fn test_main_document_part() {
        let pkg = OpcPackage::from_bytes(&create_minimal_docx()).unwrap();

        let partname = pkg.main_document_partname().unwrap();
        assert_eq!(partname.as_str(), "/word/document.xml");
        assert_eq!(pkg.content_type(&partname).unwrap(), ct::WML_DOCUMENT_MAIN);
        assert!(pkg.contains_part(&partname));
        assert!(pkg.part_rels(&partname).unwrap().is_empty());
    }

    #[test]
    fn test_missing_content_types() {
        let mut zip_data = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut zip_data));
            writer.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
            writer.write_all(b"<document/>").unwrap();
            writer.finish().unwrap();
        }
        assert!(matches!(
            OpcPackage::from_bytes(&zip_data),
            Err(OpcError::PartNotFound(_))
        ));
    }

    #[test]
    fn test_replace_blob_leaves_other_members_untouched() {
        let original = create_minimal_docx();
        let mut pkg = OpcPackage::from_bytes(&original).unwrap();
        let partname = PackURI::new("/word/document.xml").unwrap();
        pkg.replace_blob(&partname, b"<document/>".to_vec()).unwrap();

        let reread = OpcPackage::from_bytes(&pkg.to_bytes().unwrap()).unwrap();
        let before = OpcPackage::from_bytes(&original).unwrap();

        let names: Vec<_> = reread.member_names().collect();
        assert_eq!(names, before.member_names().collect::<Vec<_>>());
        assert_eq!(reread.blob(&partname).unwrap(), b"<document/>");

        for name in ["/[Content_Types].xml", "/_rels/.rels", "/word/media/image1.png"] {
            let uri = PackURI::new(name).unwrap();
            assert_eq!(reread.blob(&uri).unwrap(), before.blob(&uri).unwrap());
        }
        assert_eq!(
            reread.members()[3].compression(),
            zip::CompressionMethod::Stored
        );
    }

    #[test]
    fn test_replace_unknown_part() {
        let mut pkg = OpcPackage::from_bytes(&create_minimal_docx()).unwrap();
        let missing = PackURI::new("/word/header9.xml").unwrap();
        assert!(pkg.replace_blob(&missing, Vec::new()).is_err());
    }
}
