//! HTML serialization of a [`RichDocument`].
//!
//! Two flavours share one writer:
//! - snapshot markup, the stored post content
//! - editable markup, which additionally tags every block and text segment
//!   with its char offset so DOM selections can be mapped back to the model
//!
//! All text goes through `escape_html` and every `href`/`src` through
//! `escape_href`, and only [`SafeUrl`]s ever reach an attribute, so the
//! output is safe to inject as-is.

use std::convert::Infallible;
use std::fmt;
use std::ops::Range;

use markdown_weaver_escape::{StrWrite, escape_href, escape_html};

use crate::color::Color;
use crate::document::RichDocument;
use crate::style::{Alignment, BlockFormat, BlockKind, InlineStyle};
use crate::text::TextBuffer;
use crate::url::SafeUrl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Snapshot,
    Editable,
}

/// String sink for the HTML writer.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    buf: String,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl StrWrite for HtmlWriter {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.buf.push_str(s);
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), Infallible> {
        // Writing into a String only fails if a Display impl does.
        let _ = fmt::Write::write_fmt(&mut self.buf, args);
        Ok(())
    }
}

/// Stored markup for the document. An empty document serializes to "".
pub fn render_html(doc: &RichDocument) -> String {
    if doc.is_empty() {
        return String::new();
    }
    let mut w = HtmlWriter::new();
    let Ok(()) = write_document(&mut w, doc, RenderMode::Snapshot);
    w.into_string()
}

/// Markup for the editing surface.
pub fn render_editable(doc: &RichDocument) -> String {
    let mut w = HtmlWriter::new();
    let Ok(()) = write_document(&mut w, doc, RenderMode::Editable);
    w.into_string()
}

/// Write all blocks of `doc` to `w`.
pub fn write_document<W: StrWrite>(
    w: &mut W,
    doc: &RichDocument,
    mode: RenderMode,
) -> Result<(), W::Error> {
    let text = doc.text();
    let lines = text.len_lines();
    let mut open_list: Option<BlockKind> = None;
    let mut line = 0;

    while line < lines {
        let format = doc.block(line).unwrap_or_default();

        if open_list.is_some_and(|kind| kind != format.kind) {
            close_list(w, open_list.take())?;
        }
        if format.kind.is_list_item() && open_list.is_none() {
            w.write_str(list_tag(format.kind, true))?;
            open_list = Some(format.kind);
        }

        // Consecutive code lines form one <pre> in stored markup.
        if mode == RenderMode::Snapshot && format.kind == BlockKind::CodeBlock {
            let mut end = line + 1;
            while end < lines && doc.block(end) == Some(format) {
                end += 1;
            }
            open_block(w, format, None)?;
            let ranges: Vec<_> = (line..end).map(|l| text.line_range(l)).collect();
            if ranges.iter().all(|r| r.is_empty()) {
                w.write_str("<br>")?;
            } else {
                for (i, range) in ranges.into_iter().enumerate() {
                    if i > 0 {
                        w.write_str("\n")?;
                    }
                    write_inline(w, doc, range, mode)?;
                }
            }
            close_block(w, format)?;
            line = end;
            continue;
        }

        let range = text.line_range(line);
        let anchor = (mode == RenderMode::Editable).then(|| (line, range.clone()));
        open_block(w, format, anchor)?;
        if range.is_empty() {
            w.write_str("<br>")?;
        } else {
            write_inline(w, doc, range, mode)?;
        }
        close_block(w, format)?;
        line += 1;
    }

    close_list(w, open_list)
}

fn list_tag(kind: BlockKind, open: bool) -> &'static str {
    match (kind, open) {
        (BlockKind::NumberedItem, true) => "<ol>",
        (BlockKind::NumberedItem, false) => "</ol>",
        (_, true) => "<ul>",
        (_, false) => "</ul>",
    }
}

fn close_list<W: StrWrite>(w: &mut W, list: Option<BlockKind>) -> Result<(), W::Error> {
    match list {
        Some(kind) => w.write_str(list_tag(kind, false)),
        None => Ok(()),
    }
}

fn open_block<W: StrWrite>(
    w: &mut W,
    format: BlockFormat,
    anchor: Option<(usize, Range<usize>)>,
) -> Result<(), W::Error> {
    write!(w, "<{}", format.kind.tag())?;
    if format.align != Alignment::Left {
        write!(w, " style=\"text-align: {}\"", format.align.as_css())?;
    }
    if let Some((line, range)) = anchor {
        write!(
            w,
            " data-block=\"{}\" data-off=\"{}\" data-len=\"{}\"",
            line,
            range.start,
            range.len()
        )?;
    }
    w.write_str(">")
}

fn close_block<W: StrWrite>(w: &mut W, format: BlockFormat) -> Result<(), W::Error> {
    write!(w, "</{}>", format.kind.tag())
}

/// Inline wrappers, outermost first.
#[derive(Clone, Debug, PartialEq)]
enum InlineTag<'a> {
    Link(&'a SafeUrl),
    Color(Color),
    Strong,
    Em,
    Underline,
    Strike,
}

fn tags_for(style: &InlineStyle) -> Vec<InlineTag<'_>> {
    let mut tags = Vec::new();
    if let Some(url) = &style.link {
        tags.push(InlineTag::Link(url));
    }
    if let Some(color) = style.color {
        tags.push(InlineTag::Color(color));
    }
    if style.bold {
        tags.push(InlineTag::Strong);
    }
    if style.italic {
        tags.push(InlineTag::Em);
    }
    if style.underline {
        tags.push(InlineTag::Underline);
    }
    if style.strikethrough {
        tags.push(InlineTag::Strike);
    }
    tags
}

fn open_tag<W: StrWrite>(w: &mut W, tag: &InlineTag<'_>) -> Result<(), W::Error> {
    match tag {
        InlineTag::Link(url) => {
            w.write_str("<a href=\"")?;
            escape_href(&mut *w, url.as_str())?;
            w.write_str("\">")
        }
        InlineTag::Color(color) => write!(w, "<span style=\"color: {}\">", color),
        InlineTag::Strong => w.write_str("<strong>"),
        InlineTag::Em => w.write_str("<em>"),
        InlineTag::Underline => w.write_str("<u>"),
        InlineTag::Strike => w.write_str("<s>"),
    }
}

fn close_tag<W: StrWrite>(w: &mut W, tag: &InlineTag<'_>) -> Result<(), W::Error> {
    w.write_str(match tag {
        InlineTag::Link(_) => "</a>",
        InlineTag::Color(_) => "</span>",
        InlineTag::Strong => "</strong>",
        InlineTag::Em => "</em>",
        InlineTag::Underline => "</u>",
        InlineTag::Strike => "</s>",
    })
}

/// Write the inline content of one block, sharing wrapper tags between
/// neighbouring segments where their styles agree.
fn write_inline<W: StrWrite>(
    w: &mut W,
    doc: &RichDocument,
    range: Range<usize>,
    mode: RenderMode,
) -> Result<(), W::Error> {
    let mut stack: Vec<InlineTag<'_>> = Vec::new();

    for seg in doc.runs().segments(range) {
        let wanted = tags_for(seg.style);
        let common = stack
            .iter()
            .zip(&wanted)
            .take_while(|(open, want)| open == want)
            .count();
        while stack.len() > common {
            if let Some(tag) = stack.pop() {
                close_tag(w, &tag)?;
            }
        }
        for tag in &wanted[common..] {
            open_tag(w, tag)?;
            stack.push(tag.clone());
        }

        match seg.image {
            Some(src) => {
                w.write_str("<img src=\"")?;
                escape_href(&mut *w, src.as_str())?;
                w.write_str("\" alt=\"\"")?;
                if mode == RenderMode::Editable {
                    write!(w, " data-off=\"{}\"", seg.start)?;
                }
                w.write_str(">")?;
            }
            None => {
                let content = doc.text().slice(seg.range()).unwrap_or_default();
                if mode == RenderMode::Editable {
                    write!(w, "<span data-off=\"{}\">", seg.start)?;
                    escape_html(&mut *w, &content)?;
                    w.write_str("</span>")?;
                } else {
                    escape_html(&mut *w, &content)?;
                }
            }
        }
    }

    while let Some(tag) = stack.pop() {
        close_tag(w, &tag)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{HeadingLevel, Mark};
    use crate::types::Selection;

    fn doc(text: &str) -> RichDocument {
        RichDocument::from_plain_text(text)
    }

    fn select(doc: &mut RichDocument, start: usize, end: usize) {
        doc.set_selection(Some(Selection::new(start, end)));
    }

    #[test]
    fn test_empty_document_is_empty_string() {
        assert_eq!(render_html(&RichDocument::new()), "");
    }

    #[test]
    fn test_bold_word() {
        let mut d = doc("Hello world");
        select(&mut d, 6, 11);
        d.toggle_mark(Mark::Bold);
        insta::assert_snapshot!(render_html(&d), @"<p>Hello <strong>world</strong></p>");
    }

    #[test]
    fn test_blocks_lists_and_alignment() {
        let mut d = doc("Title\none\ntwo\nend");
        d.set_cursor_offset(0);
        d.toggle_block_kind(BlockKind::Heading(HeadingLevel::H1));
        select(&mut d, 6, 13);
        d.toggle_block_kind(BlockKind::BulletItem);
        d.set_cursor_offset(15);
        d.set_alignment(Alignment::Center);
        insta::assert_snapshot!(
            render_html(&d),
            @r#"<h1>Title</h1><ul><li>one</li><li>two</li></ul><p style="text-align: center">end</p>"#
        );
    }

    #[test]
    fn test_adjacent_lists_of_different_kinds() {
        let mut d = doc("a\nb");
        d.set_cursor_offset(0);
        d.toggle_block_kind(BlockKind::BulletItem);
        d.set_cursor_offset(2);
        d.toggle_block_kind(BlockKind::NumberedItem);
        insta::assert_snapshot!(render_html(&d), @"<ul><li>a</li></ul><ol><li>b</li></ol>");
    }

    #[test]
    fn test_text_is_escaped() {
        let d = doc("a<b>&\"c\"");
        insta::assert_snapshot!(render_html(&d), @"<p>a&lt;b&gt;&amp;&quot;c&quot;</p>");
    }

    #[test]
    fn test_nested_link_and_color() {
        let mut d = doc("go here");
        select(&mut d, 0, 7);
        d.set_color(Color::rgb(255, 0, 0));
        select(&mut d, 3, 7);
        d.set_link(SafeUrl::parse("/x").unwrap());
        insta::assert_snapshot!(
            render_html(&d),
            @r#"<p><span style="color: #FF0000">go </span><a href="/x"><span style="color: #FF0000">here</span></a></p>"#
        );
    }

    #[test]
    fn test_shared_wrappers_stay_open() {
        let mut d = doc("abcd");
        select(&mut d, 0, 4);
        d.toggle_mark(Mark::Bold);
        select(&mut d, 2, 4);
        d.toggle_mark(Mark::Italic);
        insta::assert_snapshot!(render_html(&d), @"<p><strong>ab<em>cd</em></strong></p>");
    }

    #[test]
    fn test_inline_image() {
        let mut d = doc("ab");
        d.insert_image(1..1, SafeUrl::parse("https://example.com/x.png").unwrap());
        insta::assert_snapshot!(
            render_html(&d),
            @r#"<p>a<img src="https://example.com/x.png" alt="">b</p>"#
        );
    }

    #[test]
    fn test_code_lines_share_one_pre() {
        let mut d = doc("fn a\nfn b");
        select(&mut d, 0, 9);
        d.toggle_block_kind(BlockKind::CodeBlock);
        assert_eq!(render_html(&d), "<pre>fn a\nfn b</pre>");
    }

    #[test]
    fn test_empty_block_gets_break() {
        let d = doc("a\n\nb");
        insta::assert_snapshot!(render_html(&d), @"<p>a</p><p><br></p><p>b</p>");
    }

    #[test]
    fn test_editable_markup_carries_offsets() {
        let mut d = doc("hi\n");
        select(&mut d, 0, 2);
        d.toggle_mark(Mark::Bold);
        insta::assert_snapshot!(
            render_editable(&d),
            @r#"<p data-block="0" data-off="0" data-len="2"><strong><span data-off="0">hi</span></strong></p><p data-block="1" data-off="3" data-len="0"><br></p>"#
        );
    }

    #[test]
    fn test_editable_empty_document_has_caret_block() {
        insta::assert_snapshot!(
            render_editable(&RichDocument::new()),
            @r#"<p data-block="0" data-off="0" data-len="0"><br></p>"#
        );
    }
}
