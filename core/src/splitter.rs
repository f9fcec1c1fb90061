//! Quote-aware statement splitting.
//!
//! A section document is a block of source text holding many statements
//! separated by a terminator character and a line break. Splitting it is a
//! purely lexical job, but a naive `str::split` would tear statements apart
//! at terminator sequences sitting inside quoted string literals. The
//! scanner here tracks quoted-literal state (single or double quotes,
//! backslash escapes) and only recognizes a delimiter outside of quotes.
//!
//! The splitter has no error conditions: the worst case is a single-element
//! result holding the trimmed input.

use crate::Vec;

/// The statement terminator in its three line-ending spellings.
///
/// Patterns are tried in the order given, so the longest spelling comes
/// first (otherwise `;\r` would match inside `;\r\n` and leave a stray
/// line feed on the following segment).
pub const SECTION_DELIMITERS: [&str; 3] = [";\r\n", ";\r", ";\n"];

/// Keyword opening a section document, e.g. `section Geometry;`.
pub const SECTION_KEYWORD: &str = "section";

/// Split `text` into raw statement texts at any of the `delimiters`.
///
/// Delimiter sequences inside quoted string literals (single or double
/// quotes, with backslash escapes) are never treated as split points.
/// Segments are trimmed of surrounding whitespace; a single trailing
/// terminator character (the first character of the first delimiter
/// pattern) is stripped from the final segment, since the last real
/// statement is not followed by another delimiter at end of input.
/// Leading and trailing empty segments are dropped, so a document that
/// opens or closes with a delimiter does not produce phantom statements.
///
/// # Example
///
/// ```
/// use settle_core::splitter::{SECTION_DELIMITERS, split};
///
/// let parts = split("X = 1;\nY = \"a;\nb\";\nZ = 2", &SECTION_DELIMITERS);
/// assert_eq!(parts, ["X = 1", "Y = \"a;\nb\"", "Z = 2"]);
/// ```
pub fn split<'t>(text: &'t str, delimiters: &[&str]) -> Vec<&'t str> {
    let mut segments = Vec::new();
    let mut segment_start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    let mut iter = text.char_indices().peekable();
    while let Some((pos, ch)) = iter.next() {
        if escaped {
            escaped = false;
            continue;
        }
        match quote {
            Some(open) => match ch {
                '\\' => escaped = true,
                _ if ch == open => quote = None,
                _ => {}
            },
            None => {
                if ch == '"' || ch == '\'' {
                    quote = Some(ch);
                    continue;
                }
                if let Some(pat) = delimiters.iter().find(|pat| text[pos..].starts_with(**pat)) {
                    segments.push(&text[segment_start..pos]);
                    segment_start = pos + pat.len();
                    // Skip past the rest of the delimiter.
                    while iter.peek().is_some_and(|(next, _)| *next < segment_start) {
                        iter.next();
                    }
                }
            }
        }
    }
    segments.push(&text[segment_start..]);

    // The last real statement has no following delimiter, only (at most)
    // a bare terminator before end of input.
    if let Some(term) = delimiters.first().and_then(|pat| pat.chars().next()) {
        if let Some(last) = segments.last_mut() {
            if let Some(stripped) = last.trim_end().strip_suffix(term) {
                *last = stripped;
            }
        }
    }

    for segment in segments.iter_mut() {
        *segment = segment.trim();
    }
    while segments.first().is_some_and(|s| s.is_empty()) {
        segments.remove(0);
    }
    while segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    segments
}

/// Split a section document into its statements.
///
/// Splits on [`SECTION_DELIMITERS`] and drops the leading `section <name>`
/// header segment when present. Documents without a header lose nothing:
/// only a first segment opening with the `section` keyword is dropped.
///
/// # Example
///
/// ```
/// use settle_core::splitter::split_section;
///
/// let parts = split_section("section S;\r\nX = 1;\r\nY = 2;");
/// assert_eq!(parts, ["X = 1", "Y = 2"]);
/// ```
pub fn split_section(text: &str) -> Vec<&str> {
    let mut segments = split(text, &SECTION_DELIMITERS);
    if segments.first().is_some_and(|s| is_section_header(s)) {
        segments.remove(0);
    }
    segments
}

fn is_section_header(segment: &str) -> bool {
    match segment.strip_prefix(SECTION_KEYWORD) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_basic() {
        let parts = split("X = 1;\nY = 2;\nZ = 3", &SECTION_DELIMITERS);
        assert_eq!(parts, ["X = 1", "Y = 2", "Z = 3"]);
    }

    #[test]
    fn test_split_strips_trailing_terminator() {
        let parts = split("X = 1;\nY = 2;", &SECTION_DELIMITERS);
        assert_eq!(parts, ["X = 1", "Y = 2"]);
    }

    #[test]
    fn test_split_trailing_delimiter_leaves_no_phantom_statement() {
        let parts = split("X = 1;\nY = 2;\n", &SECTION_DELIMITERS);
        assert_eq!(parts, ["X = 1", "Y = 2"]);
    }

    #[test]
    fn test_split_mixed_line_endings() {
        let parts = split("A = 1;\r\nB = 2;\rC = 3;\nD = 4", &SECTION_DELIMITERS);
        assert_eq!(parts, ["A = 1", "B = 2", "C = 3", "D = 4"]);
    }

    #[test]
    fn test_split_ignores_delimiter_in_double_quotes() {
        let parts = split("X = \"a;\nb\";\nY = 2", &SECTION_DELIMITERS);
        assert_eq!(parts, ["X = \"a;\nb\"", "Y = 2"]);
    }

    #[test]
    fn test_split_ignores_delimiter_in_single_quotes() {
        let parts = split("X = ';\r\n';\r\nY = 2", &SECTION_DELIMITERS);
        assert_eq!(parts, ["X = ';\r\n'", "Y = 2"]);
    }

    #[test]
    fn test_split_escaped_quote_does_not_close_literal() {
        let parts = split("X = \"a\\\";\nb\";\nY = 2", &SECTION_DELIMITERS);
        assert_eq!(parts, ["X = \"a\\\";\nb\"", "Y = 2"]);
    }

    #[test]
    fn test_split_no_delimiter_returns_trimmed_input() {
        let parts = split("  X = 1  ", &SECTION_DELIMITERS);
        assert_eq!(parts, ["X = 1"]);
    }

    #[test]
    fn test_split_empty_input() {
        let parts = split("", &SECTION_DELIMITERS);
        assert!(parts.is_empty());
    }

    #[test]
    fn test_split_drops_leading_empty_segment() {
        let parts = split(";\nX = 1", &SECTION_DELIMITERS);
        assert_eq!(parts, ["X = 1"]);
    }

    #[test]
    fn test_split_section_drops_header_crlf() {
        let parts = split_section("section S;\r\nX = 1;\r\nY = 2;");
        assert_eq!(parts, ["X = 1", "Y = 2"]);
    }

    #[test]
    fn test_split_section_without_header() {
        let parts = split_section("X = 1;\nY = 2;");
        assert_eq!(parts, ["X = 1", "Y = 2"]);
    }

    #[test]
    fn test_split_section_keyword_prefix_is_not_a_header() {
        // `sectionX` is an ordinary name, not a section header.
        let parts = split_section("sectionX = 1;\nY = 2;");
        assert_eq!(parts, ["sectionX = 1", "Y = 2"]);
    }
}
