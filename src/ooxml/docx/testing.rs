//! In-memory .docx fixtures for tests.
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Builds a minimal Word package around caller-supplied story XML.
pub(crate) struct DocxBuilder {
    body: String,
    headers: Vec<(u32, String)>,
    footers: Vec<(u32, String)>,
    main_content_type: String,
    with_main_part: bool,
}

impl DocxBuilder {
    pub(crate) fn new() -> Self {
        Self {
            body: String::new(),
            headers: Vec::new(),
            footers: Vec::new(),
            main_content_type: ct::WML_DOCUMENT_MAIN.to_string(),
            with_main_part: true,
        }
    }

    /// Content of `w:body`.
    pub(crate) fn body(mut self, xml: &str) -> Self {
        self.body = xml.to_string();
        self
    }

    /// Add `/word/header{n}.xml` holding `xml` inside `w:hdr`.
    pub(crate) fn header(mut self, n: u32, xml: &str) -> Self {
        self.headers.push((n, xml.to_string()));
        self
    }

    /// Add `/word/footer{n}.xml` holding `xml` inside `w:ftr`.
    pub(crate) fn footer(mut self, n: u32, xml: &str) -> Self {
        self.footers.push((n, xml.to_string()));
        self
    }

    pub(crate) fn main_content_type(mut self, content_type: &str) -> Self {
        self.main_content_type = content_type.to_string();
        self
    }

    /// Keep the relationship to the main part but leave the part out.
    pub(crate) fn without_main_part(mut self) -> Self {
        self.with_main_part = false;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let deflated = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        let mut content_types = format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "\r\n",
                r#"<Types xmlns="{}">"#,
                r#"<Default Extension="rels" ContentType="{}"/>"#,
                r#"<Default Extension="xml" ContentType="{}"/>"#,
                r#"<Default Extension="png" ContentType="image/png"/>"#,
                r#"<Override PartName="/word/document.xml" ContentType="{}"/>"#
            ),
            namespace::OPC_CONTENT_TYPES,
            ct::OPC_RELATIONSHIPS,
            ct::XML,
            self.main_content_type
        );
        let mut document_rels = String::new();
        for (kind, reltype, content_type, stories) in [
            ("header", rt::HEADER, ct::WML_HEADER, &self.headers),
            ("footer", rt::FOOTER, ct::WML_FOOTER, &self.footers),
        ] {
            for (n, _) in stories {
                content_types.push_str(&format!(
                    r#"<Override PartName="/word/{}{}.xml" ContentType="{}"/>"#,
                    kind, n, content_type
                ));
                document_rels.push_str(&format!(
                    r#"<Relationship Id="rId{}{}" Type="{}" Target="{}{}.xml"/>"#,
                    kind, n, reltype, kind, n
                ));
            }
        }
        content_types.push_str("</Types>");

        zip.start_file("[Content_Types].xml", deflated).unwrap();
        zip.write_all(content_types.as_bytes()).unwrap();

        zip.start_file("_rels/.rels", deflated).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="word/document.xml"/></Relationships>"#,
                namespace::OPC_RELATIONSHIPS,
                rt::OFFICE_DOCUMENT
            )
            .as_bytes(),
        )
        .unwrap();

        if self.with_main_part {
            zip.start_file("word/document.xml", deflated).unwrap();
            zip.write_all(story("document", &format!("<w:body>{}</w:body>", self.body)).as_bytes())
                .unwrap();
        }

        zip.start_file("word/_rels/document.xml.rels", deflated).unwrap();
        zip.write_all(
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="{}">{}</Relationships>"#,
                namespace::OPC_RELATIONSHIPS,
                document_rels
            )
            .as_bytes(),
        )
        .unwrap();

        for (n, xml) in &self.headers {
            zip.start_file(format!("word/header{}.xml", n), deflated).unwrap();
            zip.write_all(story("hdr", xml).as_bytes()).unwrap();
        }
        for (n, xml) in &self.footers {
            zip.start_file(format!("word/footer{}.xml", n), deflated).unwrap();
            zip.write_all(story("ftr", xml).as_bytes()).unwrap();
        }

        zip.start_file("word/media/image1.png", stored).unwrap();
        zip.write_all(b"\x89PNG\r\n\x1a\n").unwrap();

        zip.finish().unwrap().into_inner()
    }
}

fn story(root: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>{}<w:{} xmlns:w="{}">{}</w:{}>"#,
        "\r\n",
        root,
        namespace::WML_MAIN,
        inner,
        root
    )
}

/// A block-level control with a tag, run formatting and placeholder text.
pub(crate) fn tagged_control(tag: &str, placeholder: &str) -> String {
    format!(
        concat!(
            r#"<w:sdt><w:sdtPr><w:rPr><w:rStyle w:val="FieldText"/></w:rPr>"#,
            r#"<w:alias w:val="{tag} field"/><w:tag w:val="{tag}"/><w:id w:val="1001"/></w:sdtPr>"#,
            r#"<w:sdtContent><w:p><w:pPr><w:pStyle w:val="Body"/></w:pPr>"#,
            r#"<w:r><w:rPr><w:rStyle w:val="PlaceholderText"/></w:rPr><w:t>{placeholder}</w:t></w:r></w:p>"#,
            r#"</w:sdtContent></w:sdt>"#
        ),
        tag = tag,
        placeholder = placeholder
    )
}
