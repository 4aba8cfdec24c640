//! Mutable XML tree for package parts.
//!
//! Unlike the streaming readers used for extraction, rewriting a part needs the
//! whole element tree in memory. The tree keeps character data in its escaped
//! (raw) form and attributes in document order, so parts that are parsed and
//! written back without edits round-trip to equivalent bytes.
//!
//! Child elements are held behind [`Arc`] so that immutable sub-trees (such as
//! run properties) can be shared between several parents. Mutation goes through
//! [`Arc::make_mut`], which only clones a sub-tree when it is actually shared.

use super::escape::{escape_xml, find_invalid_xml_char, unescape_xml};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors raised while parsing or writing an XML tree.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The underlying XML reader rejected the input
    #[error("XML parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// Names, attributes or character data were not valid UTF-8
    #[error("Invalid UTF-8 in {0}")]
    Utf8(&'static str),

    /// The input contained no root element
    #[error("No root element found")]
    NoRoot,

    /// A second root element or non-whitespace text outside the root
    #[error("Unexpected content outside the root element")]
    ContentOutsideRoot,

    /// The input ended before an element was closed
    #[error("Unclosed element: {0}")]
    UnclosedElement(String),

    /// Character data contains a character XML 1.0 cannot carry
    #[error("Character U+{code:04X} cannot be written in element <{element}>")]
    InvalidCharacter { element: String, code: u32 },
}

pub type Result<T> = std::result::Result<T, XmlError>;

/// Path from a root element to one of its descendants, as child indexes.
///
/// Indexes refer to [`XmlElement::children`], text and comment nodes included.
pub type NodePath = SmallVec<[usize; 8]>;

/// A node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(Arc<XmlElement>),
    /// Character data in escaped form, exactly as it appears in the source
    Text(String),
    CData(String),
    Comment(String),
    /// Processing instruction content between `<?` and `?>`
    ProcessingInstruction(String),
    /// XML declaration content between `<?` and `?>`
    Declaration(String),
    DocType(String),
}

impl XmlNode {
    /// Create a text node from unescaped character data.
    #[inline]
    pub fn text(text: &str) -> Self {
        XmlNode::Text(escape_xml(text))
    }

    /// Wrap an element into a node.
    #[inline]
    pub fn element(element: XmlElement) -> Self {
        XmlNode::Element(Arc::new(element))
    }

    /// Get the element if this node is one.
    #[inline]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable access to the element if this node is one.
    ///
    /// Clones the element first if it is shared with another parent.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(e) => Some(Arc::make_mut(e)),
            _ => None,
        }
    }

    /// Check if this node is an element with the given namespace and local name.
    #[inline]
    pub fn is_element(&self, namespace: &str, local_name: &str) -> bool {
        self.as_element().is_some_and(|e| e.is(namespace, local_name))
    }

    fn write(&self, out: &mut Vec<u8>, parent: &str) -> Result<()> {
        match self {
            XmlNode::Element(e) => e.write(out)?,
            XmlNode::Text(raw) => {
                check_chars(raw, parent)?;
                out.extend_from_slice(raw.as_bytes());
            },
            XmlNode::CData(raw) => {
                check_chars(raw, parent)?;
                out.extend_from_slice(b"<![CDATA[");
                out.extend_from_slice(raw.as_bytes());
                out.extend_from_slice(b"]]>");
            },
            XmlNode::Comment(raw) => {
                out.extend_from_slice(b"<!--");
                out.extend_from_slice(raw.as_bytes());
                out.extend_from_slice(b"-->");
            },
            XmlNode::ProcessingInstruction(raw) | XmlNode::Declaration(raw) => {
                out.extend_from_slice(b"<?");
                out.extend_from_slice(raw.as_bytes());
                out.extend_from_slice(b"?>");
            },
            XmlNode::DocType(raw) => {
                out.extend_from_slice(b"<!DOCTYPE ");
                out.extend_from_slice(raw.as_bytes());
                out.push(b'>');
            },
        }
        Ok(())
    }
}

/// An attribute with its value kept in escaped form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    name: String,
    raw_value: String,
}

impl XmlAttribute {
    /// Create an attribute from an unescaped value.
    pub fn new(name: impl Into<String>, value: &str) -> Self {
        Self {
            name: name.into(),
            raw_value: escape_xml(value),
        }
    }

    /// Qualified attribute name (e.g. `w:val`).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute name without its prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        split_qname(&self.name).1
    }

    /// Unescaped attribute value.
    #[inline]
    pub fn value(&self) -> Cow<'_, str> {
        unescape_xml(&self.raw_value)
    }
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Qualified name as written in the source (e.g. `w:sdt`)
    name: String,
    /// Resolved namespace URI, if the element is bound to one
    namespace: Option<String>,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element.
    pub fn new(name: impl Into<String>, namespace: Option<&str>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.map(str::to_string),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty element in the same namespace and with the same prefix as `sibling`.
    ///
    /// Used to add WordprocessingML elements without re-declaring namespaces.
    pub fn new_like(sibling: &XmlElement, local_name: &str) -> Self {
        let name = match sibling.prefix() {
            Some(prefix) => format!("{}:{}", prefix, local_name),
            None => local_name.to_string(),
        };
        Self::new(name, sibling.namespace())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        split_qname(&self.name).1
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        split_qname(&self.name).0
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Check the element's namespace and local name.
    #[inline]
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name() == local_name && self.namespace() == Some(namespace)
    }

    #[inline]
    pub fn attributes(&self) -> &[XmlAttribute] {
        &self.attributes
    }

    /// Get an unescaped attribute value by local name.
    pub fn attribute(&self, local_name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|a| a.local_name() == local_name)
            .map(XmlAttribute::value)
    }

    /// Set an attribute by qualified name, replacing an existing value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let attr = XmlAttribute::new(name, value);
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => *existing = attr,
            None => self.attributes.push(attr),
        }
    }

    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<XmlNode> {
        &mut self.children
    }

    /// Iterate over child elements, skipping text and other nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Find the first child element with the given name.
    pub fn find_child(&self, namespace: &str, local_name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.is(namespace, local_name))
    }

    /// Find the first child element with the given name, returning the shared handle.
    pub fn find_child_shared(&self, namespace: &str, local_name: &str) -> Option<&Arc<XmlElement>> {
        self.children.iter().find_map(|node| match node {
            XmlNode::Element(e) if e.is(namespace, local_name) => Some(e),
            _ => None,
        })
    }

    /// Position of the first child element with the given name.
    pub fn position_of(&self, namespace: &str, local_name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|node| node.is_element(namespace, local_name))
    }

    /// Count the child elements with the given name.
    pub fn count_children(&self, namespace: &str, local_name: &str) -> usize {
        self.child_elements()
            .filter(|e| e.is(namespace, local_name))
            .count()
    }

    /// Append a child element and return its index.
    pub fn push_element(&mut self, element: XmlElement) -> usize {
        self.children.push(XmlNode::element(element));
        self.children.len() - 1
    }

    /// Append unescaped character data.
    pub fn push_text(&mut self, text: &str) {
        self.children.push(XmlNode::text(text));
    }

    /// Resolve a descendant by child-index path.
    ///
    /// An empty path resolves to `self`. Returns `None` if any step does not land
    /// on an element.
    pub fn descendant(&self, path: &[usize]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |element, &idx| {
            element.children.get(idx).and_then(XmlNode::as_element)
        })
    }

    /// Resolve a descendant by child-index path for mutation.
    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut XmlElement> {
        path.iter().try_fold(self, |element, &idx| {
            element.children.get_mut(idx).and_then(XmlNode::as_element_mut)
        })
    }

    /// Concatenated, unescaped character data of this element and its descendants.
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Element(e) => e.collect_text(out),
                XmlNode::Text(raw) => out.push_str(&unescape_xml(raw)),
                XmlNode::CData(raw) => out.push_str(raw),
                _ => {},
            }
        }
    }

    /// Serialize this element and its descendants.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }

    fn write(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(b'<');
        out.extend_from_slice(self.name.as_bytes());
        for attr in &self.attributes {
            check_chars(&attr.raw_value, &self.name)?;
            out.push(b' ');
            out.extend_from_slice(attr.name.as_bytes());
            out.extend_from_slice(b"=\"");
            // Values read from single-quoted attributes may carry a bare double quote
            for &b in attr.raw_value.as_bytes() {
                if b == b'"' {
                    out.extend_from_slice(b"&quot;");
                } else {
                    out.push(b);
                }
            }
            out.push(b'"');
        }

        if self.children.is_empty() {
            out.extend_from_slice(b"/>");
            return Ok(());
        }

        out.push(b'>');
        for child in &self.children {
            child.write(out, &self.name)?;
        }
        out.extend_from_slice(b"</");
        out.extend_from_slice(self.name.as_bytes());
        out.push(b'>');
        Ok(())
    }
}

/// A parsed XML part: prolog, root element and trailing misc nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    has_bom: bool,
    prolog: Vec<XmlNode>,
    root: XmlElement,
    epilog: Vec<XmlNode>,
}

impl XmlDocument {
    /// Create a document around a root element with a standard declaration.
    pub fn new(root: XmlElement) -> Self {
        Self {
            has_bom: false,
            prolog: vec![
                XmlNode::Declaration(r#"xml version="1.0" encoding="UTF-8" standalone="yes""#.to_string()),
                XmlNode::Text("\r\n".to_string()),
            ],
            root,
            epilog: Vec::new(),
        }
    }

    /// Parse a document from UTF-8 bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (has_bom, xml) = match bytes.strip_prefix(UTF8_BOM) {
            Some(rest) => (true, rest),
            None => (false, bytes),
        };

        let mut reader = Reader::from_reader(xml);
        let mut builder = TreeBuilder::default();

        loop {
            let event = reader.read_event().map_err(|e| XmlError::Parse {
                position: reader.buffer_position() as u64,
                message: e.to_string(),
            })?;
            match event {
                Event::Start(ref e) => builder.open(e)?,
                Event::Empty(ref e) => {
                    builder.open(e)?;
                    builder.close()?;
                },
                Event::End(_) => builder.close()?,
                Event::Text(ref e) => builder.raw_text(utf8(e, "character data")?)?,
                Event::GeneralRef(ref e) => {
                    let name = utf8(e, "entity reference")?;
                    builder.raw_text(&format!("&{};", name))?;
                },
                Event::CData(ref e) => {
                    builder.misc(XmlNode::CData(utf8(e, "CDATA section")?.to_string()))?
                },
                Event::Comment(ref e) => {
                    builder.misc(XmlNode::Comment(utf8(e, "comment")?.to_string()))?
                },
                Event::PI(ref e) => builder.misc(XmlNode::ProcessingInstruction(
                    utf8(e, "processing instruction")?.to_string(),
                ))?,
                Event::Decl(ref e) => {
                    builder.misc(XmlNode::Declaration(utf8(e, "declaration")?.to_string()))?
                },
                Event::DocType(ref e) => {
                    builder.misc(XmlNode::DocType(utf8(e, "doctype")?.trim().to_string()))?
                },
                Event::Eof => break,
            }
        }

        builder.finish(has_bom)
    }

    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// Serialize the document back to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(4096);
        if self.has_bom {
            out.extend_from_slice(UTF8_BOM);
        }
        for node in &self.prolog {
            node.write(&mut out, "")?;
        }
        self.root.write(&mut out)?;
        for node in &self.epilog {
            node.write(&mut out, "")?;
        }
        Ok(out)
    }
}

/// Namespace bindings declared on one element.
type Scope = SmallVec<[(String, String); 2]>;

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<(XmlElement, Scope)>,
    prolog: Vec<XmlNode>,
    root: Option<XmlElement>,
    epilog: Vec<XmlNode>,
}

impl TreeBuilder {
    fn open(&mut self, start: &BytesStart<'_>) -> Result<()> {
        if self.root.is_some() {
            return Err(XmlError::ContentOutsideRoot);
        }

        let name = utf8(start.name().as_ref(), "element name")?.to_string();
        let mut attributes = Vec::new();
        let mut scope = Scope::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| XmlError::Parse {
                position: 0,
                message: format!("attribute of <{}>: {}", name, e),
            })?;
            let key = utf8(attr.key.as_ref(), "attribute name")?.to_string();
            let raw_value = utf8(&attr.value, "attribute value")?.to_string();

            if key == "xmlns" {
                scope.push((String::new(), unescape_xml(&raw_value).into_owned()));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                scope.push((prefix.to_string(), unescape_xml(&raw_value).into_owned()));
            }
            attributes.push(XmlAttribute { name: key, raw_value });
        }

        let prefix = split_qname(&name).0.unwrap_or("");
        let namespace = scope
            .iter()
            .rev()
            .chain(self.stack.iter().rev().flat_map(|(_, s)| s.iter().rev()))
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.clone())
            .filter(|uri| !uri.is_empty());

        let element = XmlElement {
            name,
            namespace,
            attributes,
            children: Vec::new(),
        };
        self.stack.push((element, scope));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let (element, _) = self.stack.pop().ok_or(XmlError::ContentOutsideRoot)?;
        match self.stack.last_mut() {
            Some((parent, _)) => parent.children.push(XmlNode::element(element)),
            None => self.root = Some(element),
        }
        Ok(())
    }

    fn raw_text(&mut self, raw: &str) -> Result<()> {
        if let Some((parent, _)) = self.stack.last_mut() {
            match parent.children.last_mut() {
                Some(XmlNode::Text(existing)) => existing.push_str(raw),
                _ => parent.children.push(XmlNode::Text(raw.to_string())),
            }
            return Ok(());
        }

        if !raw.trim().is_empty() {
            return Err(XmlError::ContentOutsideRoot);
        }
        let misc = if self.root.is_some() {
            &mut self.epilog
        } else {
            &mut self.prolog
        };
        match misc.last_mut() {
            Some(XmlNode::Text(existing)) => existing.push_str(raw),
            _ => misc.push(XmlNode::Text(raw.to_string())),
        }
        Ok(())
    }

    fn misc(&mut self, node: XmlNode) -> Result<()> {
        if let Some((parent, _)) = self.stack.last_mut() {
            parent.children.push(node);
        } else if self.root.is_some() {
            self.epilog.push(node);
        } else {
            self.prolog.push(node);
        }
        Ok(())
    }

    fn finish(mut self, has_bom: bool) -> Result<XmlDocument> {
        if let Some((open, _)) = self.stack.pop() {
            return Err(XmlError::UnclosedElement(open.name));
        }
        let root = self.root.ok_or(XmlError::NoRoot)?;
        Ok(XmlDocument {
            has_bom,
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

#[inline]
fn split_qname(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

#[inline]
fn utf8<'a>(bytes: &'a [u8], what: &'static str) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| XmlError::Utf8(what))
}

fn check_chars(raw: &str, element: &str) -> Result<()> {
    match find_invalid_xml_char(raw) {
        Some(c) => Err(XmlError::InvalidCharacter {
            element: element.to_string(),
            code: c as u32,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    const SAMPLE: &str = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n",
        "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">",
        "<w:body><w:p w:rsidR=\"00AB\"><w:r><w:t xml:space=\"preserve\"> Fish &amp; chips </w:t></w:r></w:p>",
        "<!-- note --><w:sectPr/></w:body></w:document>"
    );

    #[test]
    fn test_parse_and_write_round_trip() {
        let doc = XmlDocument::parse(SAMPLE.as_bytes()).unwrap();
        let bytes = doc.to_bytes().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), SAMPLE);
    }

    #[test]
    fn test_namespace_resolution() {
        let doc = XmlDocument::parse(SAMPLE.as_bytes()).unwrap();
        let root = doc.root();
        assert!(root.is(W, "document"));
        let body = root.find_child(W, "body").unwrap();
        assert_eq!(body.count_children(W, "p"), 1);
        assert!(body.find_child(W, "sectPr").is_some());
        assert!(body.find_child("urn:other", "p").is_none());
    }

    #[test]
    fn test_default_namespace_and_undeclared_prefix() {
        let xml = r#"<document xmlns="urn:a"><x:item xmlns:x="urn:b"/><plain/></document>"#;
        let doc = XmlDocument::parse(xml.as_bytes()).unwrap();
        let children: Vec<_> = doc.root().child_elements().collect();
        assert_eq!(children[0].namespace(), Some("urn:b"));
        assert_eq!(children[1].namespace(), Some("urn:a"));
        assert_eq!(doc.root().namespace(), Some("urn:a"));
    }

    #[test]
    fn test_text_is_unescaped_on_read() {
        let doc = XmlDocument::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(doc.root().text(), " Fish & chips ");
    }

    #[test]
    fn test_attribute_lookup_by_local_name() {
        let doc = XmlDocument::parse(SAMPLE.as_bytes()).unwrap();
        let p = doc.root().descendant(&[0, 0]).unwrap();
        assert!(p.is(W, "p"));
        assert_eq!(p.attribute("rsidR").as_deref(), Some("00AB"));
        assert_eq!(p.attribute("missing"), None);
    }

    #[test]
    fn test_descendant_paths() {
        let mut doc = XmlDocument::parse(SAMPLE.as_bytes()).unwrap();
        // body -> comment sits at index 1, sectPr at index 2
        assert!(doc.root().descendant(&[0, 1]).is_none());
        assert!(doc.root().descendant(&[0, 2]).unwrap().is(W, "sectPr"));
        assert!(doc.root().descendant(&[5]).is_none());

        let sect = doc.root_mut().descendant_mut(&[0, 2]).unwrap();
        sect.set_attribute("w:rsidR", "01");
        assert_eq!(
            doc.root().descendant(&[0, 2]).unwrap().attribute("rsidR").as_deref(),
            Some("01")
        );
    }

    #[test]
    fn test_new_like_reuses_prefix_and_namespace() {
        let doc = XmlDocument::parse(SAMPLE.as_bytes()).unwrap();
        let r = XmlElement::new_like(doc.root(), "r");
        assert_eq!(r.name(), "w:r");
        assert!(r.is(W, "r"));
    }

    #[test]
    fn test_shared_children_are_cloned_on_write() {
        let shared = Arc::new(XmlElement::new("w:rPr", Some(W)));
        let mut a = XmlElement::new("w:r", Some(W));
        a.children_mut().push(XmlNode::Element(Arc::clone(&shared)));

        let rpr = a.descendant_mut(&[0]).unwrap();
        rpr.set_attribute("w:x", "1");

        assert!(shared.attributes().is_empty());
        assert_eq!(a.descendant(&[0]).unwrap().attribute("x").as_deref(), Some("1"));
    }

    #[test]
    fn test_single_quoted_attribute_is_written_with_double_quotes() {
        let xml = r#"<a b='say "hi"'/>"#;
        let doc = XmlDocument::parse(xml.as_bytes()).unwrap();
        assert_eq!(doc.root().attribute("b").as_deref(), Some("say \"hi\""));
        let written = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert_eq!(written, r#"<a b="say &quot;hi&quot;"/>"#);
    }

    #[test]
    fn test_bom_is_preserved() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"<a/>");
        let doc = XmlDocument::parse(&bytes).unwrap();
        assert_eq!(doc.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(XmlDocument::parse(b""), Err(XmlError::NoRoot)));
        assert!(matches!(
            XmlDocument::parse(b"<a><b></a>"),
            Err(XmlError::Parse { .. })
        ));
        assert!(matches!(
            XmlDocument::parse(b"<a/><b/>"),
            Err(XmlError::ContentOutsideRoot)
        ));
        assert!(matches!(
            XmlDocument::parse(b"<a/>trailing"),
            Err(XmlError::ContentOutsideRoot)
        ));
        assert!(XmlDocument::parse(b"<a>").is_err());
    }

    #[test]
    fn test_invalid_character_is_reported_on_write() {
        let mut root = XmlElement::new("a", None);
        root.push_text("bell\u{7}");
        let doc = XmlDocument::new(root);
        assert!(matches!(
            doc.to_bytes(),
            Err(XmlError::InvalidCharacter { code: 7, .. })
        ));
    }
}
