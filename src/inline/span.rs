//! Inline span types.

/// A piece of a line after inline resolution.
///
/// Everything except [`Span::Text`] has been claimed by a rule and is
/// never looked at again by lower-precedence rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Unclaimed text, still open to later rules.
    Text(&'a str),
    /// Text that must be emitted as-is (escaped), e.g. a link with an unsafe target.
    Literal(&'a str),
    /// Inline code content between backticks.
    Code(&'a str),
    /// `![alt](src)` with a safe `src`.
    Image { alt: &'a str, src: &'a str },
    /// `[text](href)` with a safe `href`.
    Link { text: &'a str, href: &'a str },
    /// `**strong**` content.
    Strong(&'a str),
    /// `*emphasis*` content.
    Emphasis(&'a str),
}

/// A rule match inside a text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found<'a> {
    /// Byte offset of the first delimiter.
    pub start: usize,
    /// Byte offset just past the last delimiter.
    pub end: usize,
    /// What the matched range resolves to.
    pub span: Span<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_size() {
        // Two string slices at most
        assert!(std::mem::size_of::<Span<'_>>() <= 40);
    }
}
