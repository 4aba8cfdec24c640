/// The PackURI value type: a part name inside an OPC package.
///
/// PackURIs always begin with a forward slash and use forward slashes as path
/// separators. The zip member name of a part is its PackURI without the
/// leading slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/word/document.xml")
    uri: String,
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

impl PackURI {
    /// Create a new PackURI from a string that must begin with a slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Create a PackURI from a zip member name such as `word/document.xml`.
    pub fn from_member_name(member: &str) -> Self {
        PackURI {
            uri: format!("/{}", member.trim_start_matches('/')),
        }
    }

    /// Resolve a relationship target against the directory of its source.
    ///
    /// `..` and `.` segments are collapsed; an absolute target ignores the base.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {},
                ".." => {
                    segments.pop();
                },
                _ => segments.push(segment),
            }
        }
        Self::new(format!("/{}", segments.join("/")))
    }

    /// The directory portion, e.g. "/word" for "/word/document.xml".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// The filename portion, e.g. "header2.xml" for "/word/header2.xml".
    pub fn filename(&self) -> &str {
        self.uri.rsplit_once('/').map_or("", |(_, name)| name)
    }

    /// The extension without its leading period.
    pub fn ext(&self) -> &str {
        self.filename().rsplit_once('.').map_or("", |(_, ext)| ext)
    }

    /// The numeric suffix of a tuple partname, e.g. 2 for "/word/header2.xml".
    ///
    /// Returns `None` for singleton partnames such as "/word/document.xml".
    pub fn idx(&self) -> Option<u32> {
        let filename = self.filename();
        let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
        let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || digits == stem.len() {
            return None;
        }
        atoi_simd::parse::<u32>(stem[stem.len() - digits..].as_bytes()).ok()
    }

    /// The zip member name (URI with leading slash stripped).
    #[inline]
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// The PackURI of the .rels part for this source.
    ///
    /// For example, "/word/_rels/document.xml.rels" for "/word/document.xml" and
    /// "/_rels/.rels" for the package itself.
    pub fn rels_uri(&self) -> PackURI {
        let uri = match self.base_uri() {
            "/" => format!("/_rels/{}.rels", self.filename()),
            base => format!("{}/_rels/{}.rels", base, self.filename()),
        };
        PackURI { uri }
    }

    /// Get the full URI string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}
