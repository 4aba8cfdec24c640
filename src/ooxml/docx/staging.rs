//! Staging a filled document on disk for delivery.
//!
//! A [`StagedDocument`] owns a named temporary file holding the document bytes
//! together with the name and content type to deliver them under. The file is
//! deleted on [`StagedDocument::close`] or, failing that, on drop.
use crate::common::{Error, Result};
use crate::ooxml::docx::config::StagingOptions;
use crate::ooxml::opc::constants::content_type as ct;
use log::{debug, warn};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A filled document written to a temporary file.
#[derive(Debug)]
pub struct StagedDocument {
    file: Option<NamedTempFile>,
    download_name: String,
}

impl StagedDocument {
    /// Write `bytes` to a new temporary file named per `options`.
    pub fn stage(bytes: &[u8], options: &StagingOptions) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(&options.prefix)
            .suffix(&options.suffix)
            .tempfile()
            .map_err(Error::Staging)?;
        file.write_all(bytes).map_err(Error::Staging)?;
        file.flush().map_err(Error::Staging)?;

        debug!("staged {} bytes at {}", bytes.len(), file.path().display());
        Ok(Self {
            file: Some(file),
            download_name: options.download_name.clone(),
        })
    }

    /// Location of the staged file, or `None` once closed.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(NamedTempFile::path)
    }

    /// File name to deliver the document under.
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.download_name
    }

    /// Content type to deliver the document with.
    #[inline]
    pub fn content_type(&self) -> &'static str {
        ct::WML_DOCUMENT
    }

    /// Read the staged bytes back.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        let path = self.path().ok_or_else(|| {
            Error::Staging(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "staged document was closed",
            ))
        })?;
        std::fs::read(path).map_err(Error::Staging)
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Delete the staged file.
    ///
    /// Only the first call does any work; later calls return `Ok(())`.
    pub fn close(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };
        let path = file.path().to_path_buf();
        file.close().map_err(|e| {
            warn!("failed to remove staged file {}: {}", path.display(), e);
            Error::ResourceCleanup(e)
        })?;
        debug!("removed staged file {}", path.display());
        Ok(())
    }
}
