//! Code span resolution.
//!
//! Code spans have highest precedence among inline elements.
//! A span is a single backtick, non-empty content without backticks,
//! and a single closing backtick.

use memchr::memchr;

use super::span::{Found, Span};

/// Find the leftmost code span starting at or after `from`.
pub fn find_code_span(text: &str, from: usize) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let mut pos = from;

    while let Some(off) = memchr(b'`', &bytes[pos..]) {
        let open = pos + off;
        let close = open + 1 + memchr(b'`', &bytes[open + 1..])?;

        if close > open + 1 {
            return Some(Found {
                start: open,
                end: close + 1,
                span: Span::Code(&text[open + 1..close]),
            });
        }

        // Empty pair: the second backtick may still open a span
        pos = close;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_code_span() {
        let found = find_code_span("hello `code` world", 0).unwrap();
        assert_eq!((found.start, found.end), (6, 12));
        assert_eq!(found.span, Span::Code("code"));
    }

    #[test]
    fn test_unmatched_backtick() {
        assert_eq!(find_code_span("hello `code world", 0), None);
    }

    #[test]
    fn test_empty_pair_skipped() {
        let found = find_code_span("``x`", 0).unwrap();
        assert_eq!(found.span, Span::Code("x"));
        assert_eq!(found.start, 1);
    }

    #[test]
    fn test_second_span_from_offset() {
        let text = "`a` and `b`";
        let first = find_code_span(text, 0).unwrap();
        let second = find_code_span(text, first.end).unwrap();
        assert_eq!(second.span, Span::Code("b"));
    }

    #[test]
    fn test_emphasis_inside_code_kept_raw() {
        let found = find_code_span("`*not emphasis*`", 0).unwrap();
        assert_eq!(found.span, Span::Code("*not emphasis*"));
    }
}
