//! Turning a raw text value into display lines.
//!
//! The whole value is trimmed once, then split on `\n`, `\r\n` and lone `\r`.
//! Interior blank lines survive; individual lines are not trimmed again.
use memchr::memchr2;

/// Split text into lines on `\n`, `\r\n` and lone `\r`.
///
/// Terminators are not part of the returned lines. A final terminator does not
/// start an extra empty line, and the empty string has no lines at all.
///
/// # Examples
///
/// ```
/// use docx_fill::ooxml::docx::split_lines;
///
/// assert_eq!(split_lines("a\r\nb\rc\n"), ["a", "b", "c"]);
/// assert_eq!(split_lines("a\n\nb"), ["a", "", "b"]);
/// assert!(split_lines("").is_empty());
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;

    while let Some(offset) = memchr2(b'\n', b'\r', &bytes[start..]) {
        let end = start + offset;
        lines.push(&text[start..end]);
        start = if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
            end + 2
        } else {
            end + 1
        };
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// An ordered sequence of display lines.
///
/// An absent, empty or whitespace-only value normalizes to no lines at all, so
/// a control filled with it is left blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineSequence {
    lines: Vec<String>,
}

impl LineSequence {
    /// Normalize a raw text value into lines.
    ///
    /// # Examples
    ///
    /// ```
    /// use docx_fill::ooxml::docx::LineSequence;
    ///
    /// let lines = LineSequence::normalize(Some("  Line one\nLine two  \n"));
    /// assert_eq!(lines.as_slice(), ["Line one", "Line two"]);
    ///
    /// assert!(LineSequence::normalize(None).is_empty());
    /// assert!(LineSequence::normalize(Some(" \r\n ")).is_empty());
    /// ```
    pub fn normalize(raw: Option<&str>) -> Self {
        let trimmed = raw.unwrap_or_default().trim();
        Self::from_lines(split_lines(trimmed))
    }

    /// Build a sequence from lines that are already split.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    /// The first line, typically a heading.
    pub fn first(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    /// Every line after the first.
    pub fn remaining(&self) -> &[String] {
        self.lines.get(1..).unwrap_or_default()
    }

    /// Lines joined back with `\n`.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

impl<S: Into<String>> FromIterator<S> for LineSequence {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_all_terminators() {
        assert_eq!(split_lines("one\ntwo\r\nthree\rfour"), ["one", "two", "three", "four"]);
        assert_eq!(split_lines("\n"), [""]);
        assert_eq!(split_lines("\r\n\r\n"), ["", ""]);
        assert_eq!(split_lines("\n\rx"), ["", "", "x"]);
        assert_eq!(split_lines("no terminator"), ["no terminator"]);
    }

    #[test]
    fn test_normalize_trims_whole_value_only() {
        let lines = LineSequence::normalize(Some("\n\n  first\n   indented\n\nlast \t\n"));
        assert_eq!(lines.as_slice(), ["first", "   indented", "", "last"]);
    }

    #[test]
    fn test_empty_values_have_no_lines() {
        for raw in [None, Some(""), Some("   "), Some("\r\n\t\n")] {
            let lines = LineSequence::normalize(raw);
            assert!(lines.is_empty(), "{:?}", raw);
            assert_eq!(lines.first(), None);
            assert!(lines.remaining().is_empty());
            assert_eq!(lines.joined(), "");
        }
    }

    #[test]
    fn test_first_and_remaining() {
        let lines = LineSequence::normalize(Some("Heading\r\nbody one\r\nbody two"));
        assert_eq!(lines.first(), Some("Heading"));
        assert_eq!(lines.remaining(), ["body one", "body two"]);
        assert_eq!(lines.joined(), "Heading\nbody one\nbody two");
        assert_eq!(lines.iter().count(), 3);
    }

    #[test]
    fn test_collect_into_sequence() {
        let lines: LineSequence = ["a", "", "b"].into_iter().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines, LineSequence::from_lines(vec!["a", "", "b"]));
    }

    proptest! {
        #[test]
        fn prop_lines_never_contain_terminators(raw in "[a-c \t\r\n]{0,40}") {
            let lines = LineSequence::normalize(Some(&raw));
            for line in lines.iter() {
                prop_assert!(!line.contains('\n') && !line.contains('\r'));
            }
        }

        #[test]
        fn prop_joined_lines_restore_trimmed_text(parts in proptest::collection::vec("[a-z]{0,5}", 1..6)) {
            let text = parts.join("\n");
            let lines = LineSequence::normalize(Some(&text));
            prop_assert_eq!(lines.joined(), text.trim());
        }

        #[test]
        fn prop_crlf_and_lf_agree(parts in proptest::collection::vec("[a-z ]{0,5}", 1..6)) {
            let lf = LineSequence::normalize(Some(&parts.join("\n")));
            let crlf = LineSequence::normalize(Some(&parts.join("\r\n")));
            prop_assert_eq!(lf, crlf);
        }
    }
}
