//! Constant values used when reading and writing WordprocessingML packages.
//!
//! Content types, namespaces, relationship types and target modes.

/// Content type URIs (like MIME-types) that specify a part's format
pub mod content_type {
    pub const OPC_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";

    /// Content type of a whole `.docx` package, used when delivering it
    pub const WML_DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    // Main document part variants
    pub const WML_DOCUMENT_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const WML_DOCUMENT_MACRO_MAIN: &str = "application/vnd.ms-word.document.macroEnabled.main+xml";
    pub const WML_TEMPLATE_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml";
    pub const WML_TEMPLATE_MACRO_MAIN: &str = "application/vnd.ms-word.template.macroEnabledTemplate.main+xml";

    pub const WML_FOOTER: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";
    pub const WML_HEADER: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";

    /// Content types accepted for the main document part.
    pub const WML_MAIN_PARTS: [&str; 4] = [
        WML_DOCUMENT_MAIN,
        WML_DOCUMENT_MACRO_MAIN,
        WML_TEMPLATE_MAIN,
        WML_TEMPLATE_MACRO_MAIN,
    ];
}

/// XML namespace URIs
pub mod namespace {
    /// OPC relationships namespace
    pub const OPC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// OPC content types namespace
    pub const OPC_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";

    /// WordprocessingML main namespace
    pub const WML_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
}

/// Open XML relationship target modes
pub mod target_mode {
    /// Internal relationship target mode (default)
    pub const INTERNAL: &str = "Internal";

    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs
pub mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const FOOTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
    pub const HEADER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
}
