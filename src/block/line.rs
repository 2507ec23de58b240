//! Line classification.
//!
//! Every line outside a code fence is classified on its trimmed text.
//! Rules are tried in a fixed order and the first match wins.

/// What a single source line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// A ```` ``` ```` delimiter, with an optional language tag.
    Fence { lang: Option<&'a str> },
    /// Only whitespace.
    Blank,
    /// `---` or `***`.
    Rule,
    /// `> text` (text may be empty).
    Quote(&'a str),
    /// `# text` through `###### text`.
    Heading { level: u8, text: &'a str },
    /// `1. text`
    OrderedItem(&'a str),
    /// `- text`, `* text` or `+ text`
    UnorderedItem(&'a str),
    /// Anything else, trimmed.
    Text(&'a str),
}

/// Maximum ATX heading level.
const MAX_HEADING_LEVEL: usize = 6;

/// Classify one line (without its line ending).
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if let Some(lang) = fence_lang(trimmed) {
        return Line::Fence { lang };
    }
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed == "---" || trimmed == "***" {
        return Line::Rule;
    }
    if let Some(quoted) = trimmed.strip_prefix('>') {
        let quoted = quoted.strip_prefix(' ').unwrap_or(quoted);
        return Line::Quote(quoted.trim());
    }
    if let Some((level, text)) = heading(trimmed) {
        return Line::Heading { level, text };
    }
    if let Some(text) = ordered_item(trimmed) {
        return Line::OrderedItem(text);
    }
    if let Some(text) = unordered_item(trimmed) {
        return Line::UnorderedItem(text);
    }

    Line::Text(trimmed)
}

/// Check for a fence delimiter.
///
/// Returns `Some(lang)` for a fence line: `Some(None)` for a bare
/// ```` ``` ````, `Some(Some(tag))` when a tag follows. A tag is one token
/// without whitespace or backticks.
pub fn fence_lang(line: &str) -> Option<Option<&str>> {
    let rest = line.trim().strip_prefix("```")?;
    if rest.is_empty() {
        return Some(None);
    }
    if rest.bytes().any(|b| b == b'`' || b.is_ascii_whitespace()) {
        return None;
    }
    Some(Some(rest))
}

/// `#{1,6}` + whitespace + non-empty text.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    let text = after_marker(line, hashes)?;
    Some((hashes as u8, text))
}

/// Digits + `.` + whitespace + non-empty text.
fn ordered_item(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || line.as_bytes().get(digits) != Some(&b'.') {
        return None;
    }
    after_marker(line, digits + 1)
}

/// `-`, `*` or `+` + whitespace + non-empty text.
fn unordered_item(line: &str) -> Option<&str> {
    match line.as_bytes().first() {
        Some(b'-' | b'*' | b'+') => after_marker(line, 1),
        _ => None,
    }
}

/// Text after a block marker of `marker_len` bytes.
///
/// The marker must be followed by at least one space or tab, and the
/// remaining text must not be empty.
fn after_marker(line: &str, marker_len: usize) -> Option<&str> {
    match line.as_bytes().get(marker_len) {
        Some(b' ' | b'\t') => {}
        _ => return None,
    }
    let text = line[marker_len..].trim();
    (!text.is_empty()).then_some(text)
}
