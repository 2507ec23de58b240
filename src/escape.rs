//! HTML escaping utilities.
//!
//! Fast-path optimized: scans for first escapable character,
//! then bulk-copies segments between escapes.

use memchr::{memchr, memchr2, memchr3};

/// Lookup table for escapable characters in text content.
/// Index by byte value, true if needs escaping.
const TEXT_ESCAPE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'<' as usize] = true;
    table[b'>' as usize] = true;
    table[b'&' as usize] = true;
    table[b'"' as usize] = true;
    table[b'\'' as usize] = true;
    table
};

/// Lookup table for escapable characters in attributes.
/// Same as text, plus the backtick (old IE treated it as a quote).
const ATTR_ESCAPE_TABLE: [bool; 256] = {
    let mut table = TEXT_ESCAPE_TABLE;
    table[b'`' as usize] = true;
    table
};

/// Escape HTML text content into output buffer.
///
/// Escapes `<`, `>`, `&`, `"` and `'` to their HTML entity equivalents.
///
/// # Example
/// ```
/// use inkpress::escape::escape_text_into;
///
/// let mut out = Vec::new();
/// escape_text_into(&mut out, b"<script>");
/// assert_eq!(out, b"&lt;script&gt;");
/// ```
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    let first = min_opt(memchr3(b'<', b'>', b'&', input), memchr2(b'"', b'\'', input));
    escape_into_with_table(out, input, first, &TEXT_ESCAPE_TABLE)
}

/// Escape HTML attribute value into output buffer.
///
/// Escapes everything [`escape_text_into`] does, and the backtick.
///
/// # Example
/// ```
/// use inkpress::escape::escape_attr_into;
///
/// let mut out = Vec::new();
/// escape_attr_into(&mut out, b"value=\"test\"`");
/// assert_eq!(out, b"value=&quot;test&quot;&#96;");
/// ```
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, input: &[u8]) {
    let first = min_opt(
        memchr3(b'<', b'>', b'&', input),
        min_opt(memchr2(b'"', b'\'', input), memchr(b'`', input)),
    );
    escape_into_with_table(out, input, first, &ATTR_ESCAPE_TABLE)
}

#[inline]
fn escape_into_with_table(
    out: &mut Vec<u8>,
    input: &[u8],
    first: Option<usize>,
    escape_table: &[bool; 256],
) {
    let mut pos = match first {
        Some(p) => p,
        None => {
            out.extend_from_slice(input);
            return;
        }
    };

    if pos > 0 {
        out.extend_from_slice(&input[..pos]);
    }

    while pos < input.len() {
        let scan_start = pos;
        while pos < input.len() && !escape_table[input[pos] as usize] {
            pos += 1;
        }

        if pos > scan_start {
            out.extend_from_slice(&input[scan_start..pos]);
        }

        if pos < input.len() {
            let escape_seq: &[u8] = match input[pos] {
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                b'&' => b"&amp;",
                b'"' => b"&quot;",
                b'\'' => b"&#39;",
                b'`' => b"&#96;",
                other => {
                    out.push(other);
                    pos += 1;
                    continue;
                }
            };
            out.extend_from_slice(escape_seq);
            pos += 1;
        }
    }
}

#[inline]
fn min_opt(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}
