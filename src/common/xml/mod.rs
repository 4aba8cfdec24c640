//! XML helpers shared by the package parts.

mod escape;
pub mod tree;

pub use escape::{escape_xml, find_invalid_xml_char, is_xml_char, unescape_xml};
pub use tree::{NodePath, XmlAttribute, XmlDocument, XmlElement, XmlError, XmlNode};
