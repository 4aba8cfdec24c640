//! Package writer for OPC packages.
//!
//! Every member of the source archive is written back in its original order.
//! Parts that were replaced carry their new content; all other members are
//! copied byte-for-byte.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;

/// Serializes an [`OpcPackage`] to a ZIP archive.
pub struct PackageWriter;

impl PackageWriter {
    /// Serialize an OPC package to bytes.
    pub fn to_bytes(package: &OpcPackage) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new();
        for member in package.members() {
            phys_writer.write(member)?;
        }
        phys_writer.finish()
    }
}
