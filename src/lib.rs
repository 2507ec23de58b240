//! inkpress: Markdown rendering and post tooling for a static blog.
//!
//! The renderer turns a deliberately small Markdown dialect into a safe HTML
//! fragment. Everything it emits comes from a fixed tag allow-list; raw HTML
//! in the input is escaped and unsafe link targets never reach an attribute.
//!
//! # Design Principles
//! - Single pass over lines, no AST
//! - No regex: byte-level scanning with `memchr`
//! - Inline spans borrow from the input until they are written
//! - Total: malformed input degrades to escaped text, never an error
//!
//! Around the renderer sit the helpers a post goes through before and after
//! rendering: front matter, post paths, the bare-image fixer and the
//! `posts.json` index.

pub mod block;
pub mod config;
pub mod escape;
pub mod front_matter;
pub mod index;
pub mod inline;
pub mod post;
pub mod render;
pub mod url;

// Re-export primary types
pub use block::BlockRenderer;
pub use config::SiteConfig;
pub use front_matter::{Document, FrontMatter};
pub use index::{IndexError, PostEntry, PostIndex};
pub use inline::{InlineParser, Span};
pub use post::{PostPath, PostPathError};
pub use render::HtmlWriter;
pub use url::is_safe_url;

/// Rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Strip a leading `---` metadata header before rendering.
    ///
    /// When disabled the header is rendered like any other Markdown, so the
    /// opening `---` becomes a horizontal rule.
    pub front_matter: bool,
}

/// Convert Markdown to HTML.
///
/// # Example
/// ```
/// let html = inkpress::to_html("# Hello\nWorld");
/// assert_eq!(html, "<h1>Hello</h1>\n<p>World</p>\n");
/// ```
pub fn to_html(input: &str) -> String {
    BlockRenderer::render(input)
}

/// Convert Markdown to HTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    parse_with_options(input, options).html
}

/// Result of rendering a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<'a> {
    /// Rendered HTML fragment.
    pub html: String,
    /// Raw front matter text, without the `---` delimiters.
    pub front_matter: Option<&'a str>,
}

impl ParseResult<'_> {
    /// Parsed metadata (empty when the post had no header).
    pub fn meta(&self) -> FrontMatter {
        self.front_matter.map(FrontMatter::parse).unwrap_or_default()
    }
}

/// Render a post, stripping its front matter.
///
/// # Example
/// ```
/// let result = inkpress::parse("---\ntitle: Hi\n---\nBody");
/// assert_eq!(result.html, "<p>Body</p>\n");
/// assert_eq!(result.meta().title(), Some("Hi"));
/// ```
pub fn parse(input: &str) -> ParseResult<'_> {
    parse_with_options(input, &Options { front_matter: true })
}

/// Render with options, returning the raw front matter when stripped.
pub fn parse_with_options<'a>(input: &'a str, options: &Options) -> ParseResult<'a> {
    let (front_matter, body) = if options.front_matter {
        front_matter::split(input)
    } else {
        (None, input)
    };
    ParseResult {
        html: to_html(body),
        front_matter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(to_html(""), "");
        assert_eq!(to_html("\n\n   \n"), "");
    }

    #[test]
    fn heading_levels() {
        assert_eq!(to_html("# H1"), "<h1>H1</h1>\n");
        assert_eq!(to_html("###### H6"), "<h6>H6</h6>\n");
        assert_eq!(to_html("####### H7"), "<p>####### H7</p>\n");
        assert_eq!(to_html("#NoSpace"), "<p>#NoSpace</p>\n");
    }

    #[test]
    fn paragraph_lines_join_with_br() {
        assert_eq!(to_html("a\nb\n\nc"), "<p>a<br />\nb</p>\n<p>c</p>\n");
    }

    #[test]
    fn list_kind_switch() {
        assert_eq!(
            to_html("- a\n- b\n1. c"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<ol>\n<li>c</li>\n</ol>\n"
        );
    }

    #[test]
    fn fence_keeps_markdown_literal() {
        assert_eq!(
            to_html("```rust\n# not a heading\n<b>\n```"),
            "<pre><code class=\"language-rust\"># not a heading\n&lt;b&gt;</code></pre>\n"
        );
    }

    #[test]
    fn raw_html_is_escaped() {
        assert_eq!(
            to_html("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>\n"
        );
    }

    #[test]
    fn unsafe_link_never_becomes_href() {
        let html = to_html("[x](javascript:alert(1))");
        assert!(!html.contains("href="));
        assert!(html.starts_with("<p>[x](javascript:alert(1)"));
    }

    #[test]
    fn external_link_attributes() {
        assert_eq!(
            to_html("[site](https://example.com)"),
            "<p><a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">site</a></p>\n"
        );
        assert_eq!(
            to_html("[home](/index.html)"),
            "<p><a href=\"/index.html\">home</a></p>\n"
        );
    }

    #[test]
    fn front_matter_option() {
        let input = "---\ntitle: T\n---\n# Body";
        assert_eq!(
            to_html_with_options(input, &Options { front_matter: true }),
            "<h1>Body</h1>\n"
        );
        assert!(to_html_with_options(input, &Options::default()).starts_with("<hr />\n"));
    }

    #[test]
    fn parse_without_header() {
        let result = parse("plain");
        assert_eq!(result.front_matter, None);
        assert!(result.meta().is_empty());
        assert_eq!(result.html, "<p>plain</p>\n");
    }

    #[test]
    fn crlf_matches_lf() {
        assert_eq!(to_html("# A\r\nb\r\n- c\r\n"), to_html("# A\nb\n- c\n"));
    }

    #[test]
    fn deterministic() {
        let input = "> q\n**b** *i* `c`\n```\nx\n```";
        assert_eq!(to_html(input), to_html(input));
    }
}
