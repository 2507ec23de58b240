//! Post metadata header.
//!
//! A post may start with a block of `key: value` lines between two `---`
//! lines:
//!
//! ```text
//! ---
//! title: Hello
//! date: 2024-05-01
//! ---
//! Body text
//! ```

use memchr::memchr;
use rustc_hash::FxHashMap;

/// Header delimiter line.
const DELIMITER: &str = "---";

/// Split a document into raw front matter and body.
///
/// The first line must be `---` (trailing whitespace allowed) and the
/// header ends at the next `---` line. Without a closing delimiter the
/// whole input is body.
///
/// # Example
/// ```
/// let (raw, body) = inkpress::front_matter::split("---\ntitle: Hi\n---\n# Body");
/// assert_eq!(raw, Some("title: Hi\n"));
/// assert_eq!(body, "# Body");
/// ```
pub fn split(input: &str) -> (Option<&str>, &str) {
    let (first, header_start) = line_at(input, 0);
    if first.trim_end() != DELIMITER {
        return (None, input);
    }

    let mut pos = header_start;
    while pos < input.len() {
        let (line, next) = line_at(input, pos);
        if line.trim_end() == DELIMITER {
            return (Some(&input[header_start..pos]), &input[next..]);
        }
        pos = next;
    }

    (None, input)
}

/// Line starting at `start` (without `\n`) and the offset of the next line.
fn line_at(input: &str, start: usize) -> (&str, usize) {
    match memchr(b'\n', &input.as_bytes()[start..]) {
        Some(off) => (&input[start..start + off], start + off + 1),
        None => (&input[start..], input.len()),
    }
}

/// Parsed `key: value` metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: FxHashMap<String, String>,
}

impl FrontMatter {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw header text.
    ///
    /// Each line is split at its first `:`. Lines without a `:` or with an
    /// empty key are ignored; a repeated key keeps its last value.
    pub fn parse(raw: &str) -> Self {
        let mut fields = FxHashMap::default();
        for line in raw.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            fields.insert(key.to_owned(), value.trim().to_owned());
        }
        Self { fields }
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Set `key` to `value`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Non-empty `title`.
    pub fn title(&self) -> Option<&str> {
        self.non_empty("title")
    }

    /// Non-empty `date` (kept as written, typically `YYYY-MM-DD`).
    pub fn date(&self) -> Option<&str> {
        self.non_empty("date")
    }

    /// Non-empty `category`.
    pub fn category(&self) -> Option<&str> {
        self.non_empty("category")
    }

    /// Non-empty `tags` (a free-form string, not split).
    pub fn tags(&self) -> Option<&str> {
        self.non_empty("tags")
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Write a post file: header with `title`, `date`, `category` and `tags`
    /// in that order (missing keys left empty), then `body`.
    ///
    /// Other keys are not written.
    pub fn compose(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len() + 96);
        out.push_str(DELIMITER);
        out.push('\n');
        for key in ["title", "date", "category", "tags"] {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(self.get(key).unwrap_or_default());
            out.push('\n');
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(body);
        out
    }
}

/// A post split into metadata and Markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    pub front_matter: FrontMatter,
    pub body: &'a str,
}

impl<'a> Document<'a> {
    /// Split and parse a post. Missing front matter yields empty metadata.
    pub fn parse(input: &'a str) -> Self {
        let (raw, body) = split(input);
        Self {
            front_matter: raw.map(FrontMatter::parse).unwrap_or_default(),
            body,
        }
    }
}
