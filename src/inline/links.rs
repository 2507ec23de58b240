//! Link and image parsing.
//!
//! Handles:
//! - Images: `![alt](url)`
//! - Inline links: `[text](url)`
//!
//! Targets go through [`is_safe_url`]; a construct with an unsafe target
//! is claimed as literal text so later rules cannot reinterpret it.

use memchr::{memchr, memmem};
use tracing::debug;

use super::span::{Found, Span};
use crate::url::is_safe_url;

/// Bracketed label and parenthesized target of a link-like construct.
struct Target<'a> {
    label: &'a str,
    url: &'a str,
    /// End of the entire construct (after closing `)`).
    end: usize,
}

/// Outcome of trying one opener.
enum Scan<'a> {
    Matched(Target<'a>),
    /// This opener does not start a target; a later one might.
    Skip,
    /// No `]` or `)` is left, so no later opener can match either.
    Exhausted,
}

/// Positions of the next `]` and `)` seen by the last lookup.
///
/// Openers are tried left to right, so a cached closer stays valid until
/// an opener moves past it. Each byte is scanned at most once per closer.
#[derive(Default)]
struct Closers {
    bracket: Option<usize>,
    paren: Option<usize>,
}

impl Closers {
    fn next_bracket(&mut self, bytes: &[u8], from: usize) -> Option<usize> {
        next_from(&mut self.bracket, b']', bytes, from)
    }

    fn next_paren(&mut self, bytes: &[u8], from: usize) -> Option<usize> {
        next_from(&mut self.paren, b')', bytes, from)
    }
}

fn next_from(cached: &mut Option<usize>, needle: u8, bytes: &[u8], from: usize) -> Option<usize> {
    if let Some(pos) = *cached {
        if pos >= from {
            return Some(pos);
        }
    }
    *cached = memchr(needle, &bytes[from..]).map(|off| from + off);
    *cached
}

/// Parse `[label](url)` with the `[` at `open`.
///
/// The label runs to the first `]`, which must be followed directly by `(`.
/// The url runs to the first `)` and must not be empty.
fn parse_target<'a>(
    text: &'a str,
    open: usize,
    allow_empty_label: bool,
    closers: &mut Closers,
) -> Scan<'a> {
    let bytes = text.as_bytes();
    let label_start = open + 1;
    let Some(label_end) = closers.next_bracket(bytes, label_start) else {
        return Scan::Exhausted;
    };

    if !allow_empty_label && label_end == label_start {
        return Scan::Skip;
    }
    if bytes.get(label_end + 1) != Some(&b'(') {
        return Scan::Skip;
    }

    let url_start = label_end + 2;
    let Some(url_end) = closers.next_paren(bytes, url_start) else {
        return Scan::Exhausted;
    };
    if url_end == url_start {
        return Scan::Skip;
    }

    Scan::Matched(Target {
        label: &text[label_start..label_end],
        url: &text[url_start..url_end],
        end: url_end + 1,
    })
}

/// Find the leftmost image starting at or after `from`.
pub fn find_image(text: &str, from: usize) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let finder = memmem::Finder::new(b"![");
    let mut closers = Closers::default();
    let mut pos = from;

    while let Some(off) = finder.find(&bytes[pos..]) {
        let start = pos + off;
        let target = match parse_target(text, start + 1, true, &mut closers) {
            Scan::Matched(target) => target,
            Scan::Skip => {
                pos = start + 1;
                continue;
            }
            Scan::Exhausted => return None,
        };

        let span = if is_safe_url(target.url) {
            Span::Image {
                alt: target.label,
                src: target.url.trim(),
            }
        } else {
            debug!(url = target.url, "rejected image source");
            Span::Literal(&text[start..target.end])
        };
        return Some(Found {
            start,
            end: target.end,
            span,
        });
    }

    None
}

/// Find the leftmost link starting at or after `from`.
pub fn find_link(text: &str, from: usize) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let mut closers = Closers::default();
    let mut pos = from;

    while let Some(off) = memchr(b'[', &bytes[pos..]) {
        let start = pos + off;
        let target = match parse_target(text, start, false, &mut closers) {
            Scan::Matched(target) => target,
            Scan::Skip => {
                pos = start + 1;
                continue;
            }
            Scan::Exhausted => return None,
        };

        let span = if is_safe_url(target.url) {
            Span::Link {
                text: target.label,
                href: target.url.trim(),
            }
        } else {
            debug!(url = target.url, "rejected link target");
            Span::Literal(&text[start..target.end])
        };
        return Some(Found {
            start,
            end: target.end,
            span,
        });
    }

    None
}
