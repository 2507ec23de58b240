//! Block renderer implementation.

use tracing::trace;

use super::line::{classify, fence_lang, Line};
use crate::inline::InlineParser;
use crate::render::HtmlWriter;

/// Kind of the currently open list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `<ol>`
    Ordered,
    /// `<ul>`
    Unordered,
}

/// State for an open fenced code block.
#[derive(Debug)]
struct FenceState<'a> {
    /// Language tag from the opening fence.
    lang: Option<&'a str>,
    /// Raw lines, kept verbatim.
    lines: Vec<&'a str>,
}

/// Single-pass block renderer.
///
/// Lines are fed one at a time; HTML is written as soon as a block
/// closes. At most one of fence / list / blockquote / paragraph is open
/// at any line boundary.
pub struct BlockRenderer<'a> {
    writer: HtmlWriter,
    inline: InlineParser<'a>,
    /// Pending paragraph lines (already trimmed).
    paragraph: Vec<&'a str>,
    fence: Option<FenceState<'a>>,
    list: Option<ListKind>,
    in_blockquote: bool,
}

impl<'a> BlockRenderer<'a> {
    /// Create a renderer sized for an input of `input_len` bytes.
    pub fn new(input_len: usize) -> Self {
        Self {
            writer: HtmlWriter::with_capacity_for(input_len),
            inline: InlineParser::new(),
            paragraph: Vec::with_capacity(8),
            fence: None,
            list: None,
            in_blockquote: false,
        }
    }

    /// Render a whole document.
    pub fn render(input: &'a str) -> String {
        let mut renderer = Self::new(input.len());
        // `lines` also strips the `\r` of `\r\n` endings
        for line in input.lines() {
            renderer.feed_line(line);
        }
        renderer.finish().into_string()
    }

    /// Process one line (without its line ending).
    pub fn feed_line(&mut self, line: &'a str) {
        if self.fence.is_some() {
            if fence_lang(line).is_some() {
                self.close_fence();
            } else if let Some(fence) = self.fence.as_mut() {
                fence.lines.push(line);
            }
            return;
        }

        match classify(line) {
            Line::Fence { lang } => {
                self.close_all();
                self.fence = Some(FenceState {
                    lang,
                    lines: Vec::new(),
                });
            }
            Line::Blank => self.close_all(),
            Line::Rule => {
                self.close_all();
                self.writer.thematic_break();
            }
            Line::Quote(text) => {
                self.flush_paragraph();
                self.close_list();
                if !self.in_blockquote {
                    self.writer.blockquote_start();
                    self.in_blockquote = true;
                }
                if !text.is_empty() {
                    self.writer.paragraph_start();
                    self.inline.render(text, &mut self.writer);
                    self.writer.paragraph_end();
                }
            }
            Line::Heading { level, text } => {
                self.close_all();
                self.writer.heading_start(level);
                self.inline.render(text, &mut self.writer);
                self.writer.heading_end(level);
            }
            Line::OrderedItem(text) => self.list_item(ListKind::Ordered, text),
            Line::UnorderedItem(text) => self.list_item(ListKind::Unordered, text),
            Line::Text(text) => {
                self.close_list();
                self.close_blockquote();
                self.paragraph.push(text);
            }
        }
    }

    /// Close whatever is still open and return the output.
    ///
    /// An unterminated fence is emitted with the lines it buffered.
    pub fn finish(mut self) -> HtmlWriter {
        if self.fence.is_some() {
            trace!("input ended inside a code fence");
            self.close_fence();
        }
        self.close_all();
        self.writer
    }

    /// Kind of list currently open, if any.
    pub fn open_list(&self) -> Option<ListKind> {
        self.list
    }

    /// Whether a blockquote is currently open.
    pub fn in_blockquote(&self) -> bool {
        self.in_blockquote
    }

    /// Whether a code fence is currently open.
    pub fn in_code_fence(&self) -> bool {
        self.fence.is_some()
    }

    fn list_item(&mut self, kind: ListKind, text: &'a str) {
        self.flush_paragraph();
        self.close_blockquote();
        if self.list != Some(kind) {
            self.close_list();
            match kind {
                ListKind::Ordered => self.writer.ol_start(),
                ListKind::Unordered => self.writer.ul_start(),
            }
            self.list = Some(kind);
        }
        self.writer.li_start();
        self.inline.render(text, &mut self.writer);
        self.writer.li_end();
    }

    fn close_all(&mut self) {
        self.flush_paragraph();
        self.close_list();
        self.close_blockquote();
    }

    /// Emit pending paragraph lines, joined by line breaks.
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        self.writer.paragraph_start();
        for (i, line) in self.paragraph.iter().enumerate() {
            if i > 0 {
                self.writer.line_break();
            }
            self.inline.render(*line, &mut self.writer);
        }
        self.writer.paragraph_end();
        self.paragraph.clear();
    }

    fn close_list(&mut self) {
        match self.list.take() {
            Some(ListKind::Ordered) => self.writer.ol_end(),
            Some(ListKind::Unordered) => self.writer.ul_end(),
            None => {}
        }
    }

    fn close_blockquote(&mut self) {
        if self.in_blockquote {
            self.writer.blockquote_end();
            self.in_blockquote = false;
        }
    }

    /// Emit the open fence; its content is escaped but never inline-parsed.
    fn close_fence(&mut self) {
        let Some(fence) = self.fence.take() else {
            return;
        };
        self.writer.code_block_start(fence.lang);
        for (i, line) in fence.lines.iter().enumerate() {
            if i > 0 {
                self.writer.newline();
            }
            self.writer.write_escaped_text(line);
        }
        self.writer.code_block_end();
    }
}
