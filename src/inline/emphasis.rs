//! Strong and emphasis matching.
//!
//! Both forms are non-greedy and never nest: the content may not
//! contain `*`. Strong runs before emphasis, so by the time emphasis is
//! matched every `**pair**` has already been claimed.

use memchr::{memchr, memmem};

use super::span::{Found, Span};

/// Find the leftmost `**strong**` starting at or after `from`.
pub fn find_strong(text: &str, from: usize) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let finder = memmem::Finder::new(b"**");
    let mut pos = from;

    while let Some(off) = finder.find(&bytes[pos..]) {
        let open = pos + off;
        let content_start = open + 2;
        let rel = memchr(b'*', &bytes[content_start..])?;
        let close = content_start + rel;

        if rel > 0 && bytes.get(close + 1) == Some(&b'*') {
            return Some(Found {
                start: open,
                end: close + 2,
                span: Span::Strong(&text[content_start..close]),
            });
        }
        pos = open + 1;
    }

    None
}

/// Find the leftmost `*emphasis*` starting at or after `from`.
///
/// The opening `*` must not touch another `*` on either side, and the
/// closing `*` must not be followed by one.
pub fn find_emphasis(text: &str, from: usize) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let mut pos = from;

    while let Some(off) = memchr(b'*', &bytes[pos..]) {
        let open = pos + off;
        let content_start = open + 1;
        let after_star = open > 0 && bytes[open - 1] == b'*';

        if !after_star && bytes.get(content_start) != Some(&b'*') {
            let close = content_start + memchr(b'*', &bytes[content_start..])?;
            if close > content_start && bytes.get(close + 1) != Some(&b'*') {
                return Some(Found {
                    start: open,
                    end: close + 1,
                    span: Span::Emphasis(&text[content_start..close]),
                });
            }
        }
        pos = open + 1;
    }

    None
}
