//! Physical access to an OPC package (the ZIP container).
//!
//! Reading keeps every member in archive order together with its compression
//! method, so a package can be written back with only selected parts changed.

use crate::ooxml::opc::error::Result;
use std::io::{Cursor, Read, Write};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// One member of the ZIP container, decompressed.
#[derive(Debug, Clone)]
pub struct PackageMember {
    /// Member name as stored in the archive (no leading slash)
    name: String,
    /// Compression method the member was stored with
    compression: CompressionMethod,
    is_dir: bool,
    data: Vec<u8>,
}

impl PackageMember {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn compression(&self) -> CompressionMethod {
        self.compression
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the member's content, keeping its name and compression.
    pub(crate) fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }
}

/// Reads every member of a ZIP-based OPC package.
pub struct PhysPkgReader;

impl PhysPkgReader {
    /// Decompress all members of the archive, in archive order.
    pub fn read_all(data: &[u8]) -> Result<Vec<PackageMember>> {
        let archive_len = data.len() as u64;
        let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
        let mut members = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            // The declared size is only a hint; the archive bounds the reservation
            let hint = entry.size().min(archive_len);
            let mut contents = Vec::with_capacity(hint as usize);
            entry.read_to_end(&mut contents)?;
            members.push(PackageMember {
                name: entry.name().to_string(),
                compression: entry.compression(),
                is_dir: entry.is_dir(),
                data: contents,
            });
        }

        Ok(members)
    }
}

/// Writes members into a new in-memory ZIP archive.
pub struct PhysPkgWriter {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Append a member, storing it uncompressed if it was stored that way.
    ///
    /// Members that used any other method are deflated.
    pub fn write(&mut self, member: &PackageMember) -> Result<()> {
        let method = match member.compression {
            CompressionMethod::Stored => CompressionMethod::Stored,
            _ => CompressionMethod::Deflated,
        };
        let options = SimpleFileOptions::default().compression_method(method);

        if member.is_dir {
            self.zip.add_directory(member.name.as_str(), options)?;
        } else {
            self.zip.start_file(member.name.as_str(), options)?;
            self.zip.write_all(&member.data)?;
        }
        Ok(())
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.zip.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive(entries: &[(&str, CompressionMethod, &[u8])]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, method, data) in entries {
            let options = SimpleFileOptions::default().compression_method(*method);
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_keeps_order_and_compression() {
        let bytes = archive(&[
            ("b.xml", CompressionMethod::Deflated, b"<b/>"),
            ("media/a.png", CompressionMethod::Stored, b"\x89PNG"),
        ]);
        let members = PhysPkgReader::read_all(&bytes).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name(), "b.xml");
        assert_eq!(members[0].compression(), CompressionMethod::Deflated);
        assert_eq!(members[1].name(), "media/a.png");
        assert_eq!(members[1].compression(), CompressionMethod::Stored);
        assert_eq!(members[1].data(), b"\x89PNG");
    }

    #[test]
    fn test_write_then_read() {
        let bytes = archive(&[
            ("one.xml", CompressionMethod::Deflated, b"<one/>"),
            ("two.bin", CompressionMethod::Stored, b"\x00\x01"),
        ]);
        let members = PhysPkgReader::read_all(&bytes).unwrap();

        let mut writer = PhysPkgWriter::new();
        for member in &members {
            writer.write(member).unwrap();
        }
        let rewritten = PhysPkgReader::read_all(&writer.finish().unwrap()).unwrap();

        let names: Vec<_> = rewritten.iter().map(PackageMember::name).collect();
        assert_eq!(names, ["one.xml", "two.bin"]);
        assert_eq!(rewritten[1].compression(), CompressionMethod::Stored);
        assert_eq!(rewritten[0].data(), b"<one/>");
    }

    #[test]
    fn test_declared_size_does_not_drive_allocation() {
        let mut bytes = archive(&[("a.txt", CompressionMethod::Stored, b"abcd")]);

        // Uncompressed size field of the central directory header
        let header = bytes
            .windows(4)
            .position(|w| w == b"PK\x01\x02")
            .unwrap();
        bytes[header + 24..header + 28].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

        let members = PhysPkgReader::read_all(&bytes).unwrap();
        assert_eq!(members[0].data(), b"abcd");
        assert!(members[0].data.capacity() <= bytes.len());
    }

    #[test]
    fn test_not_a_zip() {
        assert!(PhysPkgReader::read_all(b"definitely not a zip archive").is_err());
    }
}
