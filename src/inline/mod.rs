//! Inline formatting for Markdown.
//!
//! Rules run in fixed precedence over the still-unclaimed text:
//! 1. Code spans
//! 2. Images
//! 3. Links
//! 4. Strong (`**`)
//! 5. Emphasis (`*`)
//!
//! Each rule splits [`Span::Text`] pieces around its matches; whatever a
//! rule claims is out of reach for the rules after it. Text is only
//! escaped when spans are written, so nothing is escaped twice.

mod code_span;
mod emphasis;
mod links;
pub mod span;

pub use span::{Found, Span};

use memchr::memchr3;
use smallvec::SmallVec;

use crate::render::HtmlWriter;
use crate::url::is_external;
use code_span::find_code_span;
use emphasis::{find_emphasis, find_strong};
use links::{find_image, find_link};

/// A rule locating its leftmost match at or after a byte offset.
type Rule = for<'t> fn(&'t str, usize) -> Option<Found<'t>>;

/// Rules in precedence order.
const RULES: [Rule; 5] = [find_code_span, find_image, find_link, find_strong, find_emphasis];

type SpanBuf<'a> = SmallVec<[Span<'a>; 8]>;

/// Inline parser with reusable span buffers.
pub struct InlineParser<'a> {
    spans: SpanBuf<'a>,
    scratch: SpanBuf<'a>,
}

impl<'a> InlineParser<'a> {
    /// Create a new inline parser.
    pub fn new() -> Self {
        Self {
            spans: SmallVec::new(),
            scratch: SmallVec::new(),
        }
    }

    /// Resolve a line of text into spans.
    pub fn parse(&mut self, text: &'a str) -> &[Span<'a>] {
        self.spans.clear();
        if text.is_empty() {
            return &self.spans;
        }
        self.spans.push(Span::Text(text));

        // No delimiter at all: nothing to resolve
        if memchr3(b'`', b'[', b'*', text.as_bytes()).is_none() {
            return &self.spans;
        }

        for rule in RULES {
            self.apply(rule);
        }
        &self.spans
    }

    /// Parse `text` and write the resulting HTML.
    pub fn render(&mut self, text: &'a str, writer: &mut HtmlWriter) {
        self.parse(text);
        for span in &self.spans {
            write_span(span, writer);
        }
    }

    fn apply(&mut self, rule: Rule) {
        std::mem::swap(&mut self.spans, &mut self.scratch);
        self.spans.clear();
        for span in self.scratch.drain(..) {
            match span {
                Span::Text(text) => split_text(text, rule, &mut self.spans),
                claimed => self.spans.push(claimed),
            }
        }
    }
}

impl Default for InlineParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Split one text span around every non-overlapping match of `rule`.
fn split_text<'a>(text: &'a str, rule: Rule, out: &mut SpanBuf<'a>) {
    let mut emitted = 0;

    while emitted < text.len() {
        let Some(found) = rule(text, emitted) else {
            break;
        };
        if found.start > emitted {
            out.push(Span::Text(&text[emitted..found.start]));
        }
        out.push(found.span);
        emitted = found.end;
    }

    if emitted < text.len() {
        out.push(Span::Text(&text[emitted..]));
    }
}

/// Write a single resolved span.
fn write_span(span: &Span<'_>, writer: &mut HtmlWriter) {
    match *span {
        Span::Text(text) | Span::Literal(text) => writer.write_escaped_text(text),
        Span::Code(code) => writer.inline_code(code),
        Span::Image { alt, src } => writer.image(src, alt),
        Span::Link { text, href } => writer.link(href, text, is_external(href)),
        Span::Strong(text) => writer.strong(text),
        Span::Emphasis(text) => writer.emphasis(text),
    }
}

/// Render a single line of inline Markdown to HTML.
///
/// # Example
/// ```
/// assert_eq!(
///     inkpress::inline::render_line("**bold** and `code`"),
///     "<strong>bold</strong> and <code>code</code>"
/// );
/// ```
pub fn render_line(text: &str) -> String {
    let mut writer = HtmlWriter::with_capacity_for(text.len());
    InlineParser::new().render(text, &mut writer);
    writer.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<Span<'_>> {
        let mut parser = InlineParser::new();
        parser.parse(text).to_vec()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(spans("just words"), vec![Span::Text("just words")]);
        assert!(spans("").is_empty());
    }

    #[test]
    fn test_code_shields_emphasis() {
        assert_eq!(
            spans("`*a*` *b*"),
            vec![Span::Code("*a*"), Span::Text(" "), Span::Emphasis("b")]
        );
    }

    #[test]
    fn test_code_shields_link() {
        assert_eq!(spans("`[x](y)`"), vec![Span::Code("[x](y)")]);
    }

    #[test]
    fn test_image_before_link() {
        assert_eq!(
            spans("![a](b.png)"),
            vec![Span::Image {
                alt: "a",
                src: "b.png"
            }]
        );
    }

    #[test]
    fn test_rejected_image_not_relinked() {
        assert_eq!(
            spans("![x](javascript:y)"),
            vec![Span::Literal("![x](javascript:y)")]
        );
    }

    #[test]
    fn test_link_text_not_emphasized() {
        assert_eq!(
            spans("[*a*](b.html) *c*"),
            vec![
                Span::Link {
                    text: "*a*",
                    href: "b.html"
                },
                Span::Text(" "),
                Span::Emphasis("c"),
            ]
        );
    }

    #[test]
    fn test_strong_then_emphasis() {
        assert_eq!(
            spans("**bold** and *italic*"),
            vec![
                Span::Strong("bold"),
                Span::Text(" and "),
                Span::Emphasis("italic"),
            ]
        );
    }

    #[test]
    fn test_render_line_escapes_text() {
        assert_eq!(render_line("a < b & *c*"), "a &lt; b &amp; <em>c</em>");
    }

    #[test]
    fn test_render_line_external_link() {
        assert_eq!(
            render_line("[site](https://example.com)"),
            "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">site</a>"
        );
    }

    #[test]
    fn test_render_line_unsafe_link_literal() {
        assert_eq!(
            render_line("[x](javascript:alert('x'))"),
            "[x](javascript:alert(&#39;x&#39;))"
        );
    }

    #[test]
    fn test_parser_reuse() {
        let mut parser = InlineParser::new();
        assert_eq!(parser.parse("*a*").len(), 1);
        assert_eq!(parser.parse("plain").to_vec(), vec![Span::Text("plain")]);
    }
}
