//! Content type discovery for OPC packages.
//!
//! Implements the lookup defined by `[Content_Types].xml`: an `Override` for
//! the exact partname wins, otherwise the `Default` for the extension applies.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Content type map for looking up content types by part name or extension.
#[derive(Debug, Default)]
pub struct ContentTypeMap {
    /// Maps lower-cased file extensions to default content types
    defaults: HashMap<String, String>,

    /// Maps lower-cased partnames to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from [Content_Types].xml.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let target = match e.local_name().as_ref() {
                        b"Default" => Some(&mut map.defaults),
                        b"Override" => Some(&mut map.overrides),
                        _ => None,
                    };

                    if let Some(target) = target {
                        let mut key = None;
                        let mut content_type = None;
                        for attr in e.attributes() {
                            let attr = attr?;
                            match attr.key.as_ref() {
                                // Extension for Default, PartName for Override
                                b"Extension" | b"PartName" => {
                                    key = Some(attr.unescape_value()?.to_lowercase())
                                },
                                b"ContentType" => {
                                    content_type = Some(attr.unescape_value()?.into_owned())
                                },
                                _ => {},
                            }
                        }

                        if let (Some(key), Some(ct)) = (key, content_type) {
                            target.insert(key, ct);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Get the content type for a partname.
    ///
    /// Partnames compare case-insensitively, as OPC requires.
    pub fn get(&self, pack_uri: &PackURI) -> Result<&str> {
        if let Some(ct) = self.overrides.get(&pack_uri.as_str().to_lowercase()) {
            return Ok(ct);
        }
        self.defaults
            .get(&pack_uri.ext().to_lowercase())
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }
}
