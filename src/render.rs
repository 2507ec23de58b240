//! HTML output writer with optimized buffer management.
//!
//! Every tag the renderer can produce is written through one of the
//! helpers below; nothing else emits markup.

use crate::escape;

/// HTML output writer with pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use inkpress::HtmlWriter;
///
/// let mut writer = HtmlWriter::with_capacity_for(1000);
/// writer.paragraph_start();
/// writer.write_escaped_text("Hello <World>");
/// writer.paragraph_end();
///
/// let html = writer.into_string();
/// assert_eq!(html, "<p>Hello &lt;World&gt;</p>\n");
/// ```
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    /// Create with pre-allocated capacity based on expected input size.
    ///
    /// Typical HTML is ~1.25x input size.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: Vec::with_capacity(input_len + input_len / 4),
        }
    }

    /// Write a static string (compile-time known markup).
    #[inline]
    fn write_str(&mut self, s: &'static str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    #[inline]
    fn write_byte(&mut self, b: u8) {
        self.out.push(b);
    }

    /// Write text with HTML escaping (for text content).
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        escape::escape_text_into(&mut self.out, text.as_bytes());
    }

    /// Write attribute value with full escaping (including quotes and backticks).
    #[inline]
    pub fn write_escaped_attr(&mut self, attr: &str) {
        escape::escape_attr_into(&mut self.out, attr.as_bytes());
    }

    /// Write a newline.
    #[inline]
    pub fn newline(&mut self) {
        self.out.push(b'\n');
    }

    /// Current output length.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Get output as str.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: We only write valid UTF-8 (ASCII tags + escaped str content)
        unsafe { std::str::from_utf8_unchecked(&self.out) }
    }

    /// Take ownership as String.
    #[inline]
    pub fn into_string(self) -> String {
        // SAFETY: We only write valid UTF-8
        unsafe { String::from_utf8_unchecked(self.out) }
    }

    // --- Block elements ---

    /// Write paragraph start: `<p>`
    #[inline]
    pub fn paragraph_start(&mut self) {
        self.write_str("<p>");
    }

    /// Write paragraph end: `</p>\n`
    #[inline]
    pub fn paragraph_end(&mut self) {
        self.write_str("</p>\n");
    }

    /// Write heading start: `<hN>`
    #[inline]
    pub fn heading_start(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("<h");
        self.write_byte(b'0' + level);
        self.write_byte(b'>');
    }

    /// Write heading end: `</hN>\n`
    #[inline]
    pub fn heading_end(&mut self, level: u8) {
        debug_assert!((1..=6).contains(&level));
        self.write_str("</h");
        self.write_byte(b'0' + level);
        self.write_str(">\n");
    }

    /// Write code block start with optional language class.
    #[inline]
    pub fn code_block_start(&mut self, lang: Option<&str>) {
        match lang {
            Some(l) if !l.is_empty() => {
                self.write_str("<pre><code class=\"language-");
                self.write_escaped_attr(l);
                self.write_str("\">");
            }
            _ => self.write_str("<pre><code>"),
        }
    }

    /// Write code block end: `</code></pre>\n`
    #[inline]
    pub fn code_block_end(&mut self) {
        self.write_str("</code></pre>\n");
    }

    /// Write thematic break: `<hr />\n`
    #[inline]
    pub fn thematic_break(&mut self) {
        self.write_str("<hr />\n");
    }

    /// Write blockquote start: `<blockquote>\n`
    #[inline]
    pub fn blockquote_start(&mut self) {
        self.write_str("<blockquote>\n");
    }

    /// Write blockquote end: `</blockquote>\n`
    #[inline]
    pub fn blockquote_end(&mut self) {
        self.write_str("</blockquote>\n");
    }

    /// Write unordered list start: `<ul>\n`
    #[inline]
    pub fn ul_start(&mut self) {
        self.write_str("<ul>\n");
    }

    /// Write unordered list end: `</ul>\n`
    #[inline]
    pub fn ul_end(&mut self) {
        self.write_str("</ul>\n");
    }

    /// Write ordered list start: `<ol>\n`
    #[inline]
    pub fn ol_start(&mut self) {
        self.write_str("<ol>\n");
    }

    /// Write ordered list end: `</ol>\n`
    #[inline]
    pub fn ol_end(&mut self) {
        self.write_str("</ol>\n");
    }

    /// Write list item start: `<li>`
    #[inline]
    pub fn li_start(&mut self) {
        self.write_str("<li>");
    }

    /// Write list item end: `</li>\n`
    #[inline]
    pub fn li_end(&mut self) {
        self.write_str("</li>\n");
    }

    /// Write line break between paragraph lines: `<br />\n`
    #[inline]
    pub fn line_break(&mut self) {
        self.write_str("<br />\n");
    }

    // --- Inline elements ---

    /// Write inline code: `<code>escaped_content</code>`
    #[inline]
    pub fn inline_code(&mut self, content: &str) {
        self.write_str("<code>");
        self.write_escaped_text(content);
        self.write_str("</code>");
    }

    /// Write `<strong>escaped_content</strong>`
    #[inline]
    pub fn strong(&mut self, content: &str) {
        self.write_str("<strong>");
        self.write_escaped_text(content);
        self.write_str("</strong>");
    }

    /// Write `<em>escaped_content</em>`
    #[inline]
    pub fn emphasis(&mut self, content: &str) {
        self.write_str("<em>");
        self.write_escaped_text(content);
        self.write_str("</em>");
    }

    /// Write a complete anchor.
    ///
    /// External targets open in a new browsing context without leaking
    /// the opener or referrer.
    #[inline]
    pub fn link(&mut self, href: &str, text: &str, external: bool) {
        self.write_str("<a href=\"");
        self.write_escaped_attr(href);
        if external {
            self.write_str("\" target=\"_blank\" rel=\"noopener noreferrer");
        }
        self.write_str("\">");
        self.write_escaped_text(text);
        self.write_str("</a>");
    }

    /// Write a lazily loaded image: `<img src=".." alt=".." loading="lazy" />`
    #[inline]
    pub fn image(&mut self, src: &str, alt: &str) {
        self.write_str("<img src=\"");
        self.write_escaped_attr(src);
        self.write_str("\" alt=\"");
        self.write_escaped_attr(alt);
        self.write_str("\" loading=\"lazy\" />");
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
