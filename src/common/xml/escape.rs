use aho_corasick::AhoCorasick;
use memchr::memchr;
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use docx_fill::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Unescape XML entity and character references.
///
/// Handles the five predefined entities plus decimal (`&#65;`) and hexadecimal
/// (`&#x41;`) character references. Unknown or malformed references are left
/// unchanged. Borrows the input when it contains no `&`.
///
/// # Examples
///
/// ```
/// use docx_fill::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&#65;&#x42;"), "AB");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// assert_eq!(unescape_xml("&amp"), "&amp");
/// ```
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    let Some(first) = memchr(b'&', s.as_bytes()) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut rest = &s[first..];

    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';').and_then(|end| decode_reference(&tail[1..end]).map(|c| (c, end))) {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            },
            None => {
                out.push('&');
                rest = &tail[1..];
            },
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => atoi_simd::parse::<u32>(digits.as_bytes()).ok()?,
            };
            char::from_u32(code)
        },
    }
}

/// Check whether a character may appear in an XML 1.0 document.
#[inline]
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Find the first character that XML 1.0 cannot represent.
#[inline]
pub fn find_invalid_xml_char(s: &str) -> Option<char> {
    s.chars().find(|&c| !is_xml_char(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_round_trip_of_special_characters() {
        let raw = "Tom & Jerry <\"quoted\"> 'single'";
        assert_eq!(unescape_xml(&escape_xml(raw)), raw);
    }

    #[test]
    fn test_unescape_borrows_plain_text() {
        assert!(matches!(unescape_xml("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape_numeric_references() {
        assert_eq!(unescape_xml("caf&#233; &#x2014; ok"), "café — ok");
        assert_eq!(unescape_xml("&#xZZ;"), "&#xZZ;");
        assert_eq!(unescape_xml("&#1114112;"), "&#1114112;");
    }

    #[test]
    fn test_unescape_dangling_ampersand() {
        assert_eq!(unescape_xml("a & b"), "a & b");
        assert_eq!(unescape_xml("a &amp"), "a &amp");
    }

    #[test]
    fn test_invalid_xml_chars() {
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('é'));
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{B}'));
        assert_eq!(find_invalid_xml_char("ok\u{1}bad"), Some('\u{1}'));
        assert_eq!(find_invalid_xml_char("all good"), None);
    }
}
