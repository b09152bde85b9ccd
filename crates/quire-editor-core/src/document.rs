//! The rich-text document model.
//!
//! A `RichDocument` is three aligned layers over one char index space:
//! the text rope, the inline style runs and one block format per line.
//! Every mutation goes through the methods here so the layers never drift.

use std::ops::{Range, RangeInclusive};

use crate::color::Color;
use crate::render;
use crate::runs::{StyleRun, StyleRuns};
use crate::style::{Alignment, BlockFormat, BlockKind, InlineStyle, Mark};
use crate::text::{EditorRope, OBJECT_REPLACEMENT, TextBuffer, normalize_text};
use crate::text_helpers::{
    find_line_end, find_line_start, find_word_boundary_backward, find_word_boundary_forward,
    next_grapheme_boundary, prev_grapheme_boundary, word_range_at,
};
use crate::types::{CursorState, Selection};
use crate::undo::{EditKind, History, UndoManager};
use crate::url::SafeUrl;

/// Everything undo restores.
#[derive(Clone, Debug, PartialEq)]
struct Snapshot {
    text: EditorRope,
    runs: StyleRuns,
    blocks: Vec<BlockFormat>,
    cursor: CursorState,
    selection: Option<Selection>,
}

#[derive(Clone, Debug)]
pub struct RichDocument {
    text: EditorRope,
    runs: StyleRuns,
    blocks: Vec<BlockFormat>,
    cursor: CursorState,
    selection: Option<Selection>,
    /// Formatting toggled on a collapsed caret, applied to the next insert.
    typing_style: Option<InlineStyle>,
    history: History<Snapshot>,
    revision: u64,
}

impl Default for RichDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RichDocument {
    pub fn new() -> Self {
        Self::with_undo_depth(100)
    }

    /// Empty document keeping at most `max_steps` undo steps.
    pub fn with_undo_depth(max_steps: usize) -> Self {
        Self {
            text: EditorRope::new(),
            runs: StyleRuns::new(),
            blocks: vec![BlockFormat::default()],
            cursor: CursorState::default(),
            selection: None,
            typing_style: None,
            history: History::new(max_steps),
            revision: 0,
        }
    }

    /// Unstyled paragraphs, one per line of `text`.
    pub fn from_plain_text(text: &str) -> Self {
        let mut doc = Self::new();
        doc.raw_insert(0, text, InlineStyle::default());
        doc.blocks.fill(BlockFormat::default());
        doc
    }

    // === Accessors ===

    pub fn text(&self) -> &EditorRope {
        &self.text
    }

    pub fn runs(&self) -> &StyleRuns {
        &self.runs
    }

    pub fn blocks(&self) -> &[BlockFormat] {
        &self.blocks
    }

    pub fn block(&self, line: usize) -> Option<BlockFormat> {
        self.blocks.get(line).copied()
    }

    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text content with images dropped.
    pub fn plain_text(&self) -> String {
        self.text
            .to_string()
            .chars()
            .filter(|c| *c != OBJECT_REPLACEMENT)
            .collect()
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor.offset
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// The selected range, or an empty range at the caret.
    pub fn selection_range(&self) -> Range<usize> {
        match self.selection {
            Some(sel) => sel.to_range(),
            None => self.cursor.offset..self.cursor.offset,
        }
    }

    /// Selected text, images dropped.
    pub fn selected_text(&self) -> String {
        self.text
            .slice(self.selection_range())
            .map(|s| s.chars().filter(|c| *c != OBJECT_REPLACEMENT).collect())
            .unwrap_or_default()
    }

    /// Bumped on every change to content, selection or typing style.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn typing_style(&self) -> Option<&InlineStyle> {
        self.typing_style.as_ref()
    }

    /// Style the next typed character would get.
    pub fn pending_style(&self) -> InlineStyle {
        self.typing_style
            .clone()
            .unwrap_or_else(|| self.inherited_style(self.cursor.offset))
    }

    /// Format of the block holding the caret.
    pub fn current_block(&self) -> BlockFormat {
        self.block(self.text.char_to_line(self.cursor.offset))
            .unwrap_or_default()
    }

    /// Serialized markup of the whole document.
    pub fn to_html(&self) -> String {
        render::render_html(self)
    }

    // === Caret and selection ===

    /// Collapse the selection to `offset`.
    pub fn set_cursor_offset(&mut self, offset: usize) {
        let offset = offset.min(self.len_chars());
        if self.selection.is_none() && self.cursor.offset == offset {
            return;
        }
        self.set_caret(offset);
        self.touch();
    }

    /// Set the selection; a collapsed selection becomes a plain caret.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        let max = self.len_chars();
        let next = selection.map(|s| s.clamped(max));
        let (cursor, selection) = match next {
            Some(sel) if !sel.is_collapsed() => (sel.head, Some(sel)),
            Some(sel) => (sel.head, None),
            None => (self.cursor.offset.min(max), None),
        };
        if cursor == self.cursor.offset && selection == self.selection {
            return;
        }
        if cursor != self.cursor.offset {
            self.typing_style = None;
        }
        self.cursor = CursorState::new(cursor);
        self.selection = selection;
        self.touch();
    }

    pub fn select_all(&mut self) -> bool {
        let len = self.len_chars();
        self.set_selection(Some(Selection::new(0, len)));
        true
    }

    fn set_caret(&mut self, offset: usize) {
        self.cursor = CursorState::new(offset);
        self.selection = None;
        self.typing_style = None;
    }

    // === Text editing ===

    /// Replace `range` with `text`. Newlines in `text` split blocks, each new
    /// block copying the format of the block it was split from.
    pub fn insert_text(&mut self, range: Range<usize>, text: &str) -> bool {
        let range = self.clamp_range(range);
        let text = normalize_text(text);
        if text.is_empty() {
            return self.delete_range(range);
        }

        let kind = if range.is_empty() && text.chars().count() == 1 && text != "\n" {
            EditKind::Typing {
                end: range.start + 1,
            }
        } else {
            EditKind::Other
        };
        let style = match self.typing_style.take() {
            Some(style) => style,
            None if !range.is_empty() => self.replaced_style(range.start),
            None => self.inherited_style(range.start),
        };

        self.checkpoint(kind);
        self.raw_delete(range.clone());
        let inserted = self.raw_insert(range.start, &text, style);
        self.set_caret(range.start + inserted);
        self.touch();
        true
    }

    /// Remove `range`. The merged block keeps the format of the first block.
    pub fn delete_range(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        if range.is_empty() {
            return false;
        }
        self.checkpoint(EditKind::Other);
        self.raw_delete(range.clone());
        self.set_caret(range.start);
        self.touch();
        true
    }

    /// Backspace.
    ///
    /// At the start of a non-paragraph block the block first becomes a
    /// paragraph; only a second Backspace merges it into the previous block.
    pub fn delete_backward(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        if !range.is_empty() {
            return self.delete_range(range);
        }

        let offset = range.start;
        let line = self.text.char_to_line(offset);
        let at_line_start = offset == self.text.line_to_char(line);
        if at_line_start && self.blocks[line].kind != BlockKind::Paragraph {
            self.checkpoint(EditKind::Other);
            self.blocks[line].kind = BlockKind::Paragraph;
            self.set_caret(offset);
            self.touch();
            return true;
        }
        if offset == 0 {
            return false;
        }
        let start = prev_grapheme_boundary(&self.text, offset);
        self.delete_range(start..offset)
    }

    /// Delete key.
    pub fn delete_forward(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        if !range.is_empty() {
            return self.delete_range(range);
        }
        let end = next_grapheme_boundary(&self.text, range.start);
        self.delete_range(range.start..end)
    }

    pub fn delete_word_backward(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        if !range.is_empty() {
            return self.delete_range(range);
        }
        let start = find_word_boundary_backward(&self.text, range.start);
        self.delete_range(start..range.start)
    }

    pub fn delete_word_forward(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        if !range.is_empty() {
            return self.delete_range(range);
        }
        let end = find_word_boundary_forward(&self.text, range.start);
        self.delete_range(range.start..end)
    }

    pub fn delete_to_line_start(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        let start = find_line_start(&self.text, range.start);
        self.delete_range(start..range.end)
    }

    pub fn delete_to_line_end(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        let end = find_line_end(&self.text, range.end);
        self.delete_range(range.start..end)
    }

    /// Enter.
    ///
    /// Splits the block at the caret. An empty list item leaves the list
    /// instead, and a heading split at its end is followed by a paragraph.
    pub fn split_block(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        let style = self
            .typing_style
            .clone()
            .unwrap_or_else(|| self.inherited_style(range.start));
        self.checkpoint(EditKind::Other);
        self.raw_delete(range.clone());

        let offset = range.start;
        let line = self.text.char_to_line(offset);
        let format = self.blocks[line];
        let line_range = self.text.line_range(line);

        if format.kind.is_list_item() && line_range.is_empty() {
            self.blocks[line].kind = BlockKind::Paragraph;
            self.set_caret(offset);
            self.touch();
            return true;
        }

        let at_end = offset == line_range.end;
        self.raw_insert(offset, "\n", style.clone());
        if at_end {
            self.blocks[line + 1].kind = format.kind.continuation();
        }
        self.set_caret(offset + 1);
        // Pending formatting carries over into the new block.
        self.typing_style = Some(style).filter(|s| !s.is_plain());
        self.touch();
        true
    }

    /// Replace `range` with an inline image.
    pub fn insert_image(&mut self, range: Range<usize>, src: SafeUrl) -> bool {
        let range = self.clamp_range(range);
        self.checkpoint(EditKind::Other);
        self.raw_delete(range.clone());
        let mut slot = [0u8; 4];
        self.text
            .insert(range.start, OBJECT_REPLACEMENT.encode_utf8(&mut slot));
        self.runs
            .insert_run(range.start, StyleRun::image(src, InlineStyle::default()));
        self.set_caret(range.start + 1);
        self.touch();
        true
    }

    // === Inline formatting ===

    /// Toggle a mark over the selection, the word around the caret, or the
    /// typing style, in that order of preference.
    pub fn toggle_mark(&mut self, mark: Mark) -> bool {
        match self.format_target() {
            Some(target) => {
                let parts = self.content_ranges(target);
                let all = parts
                    .iter()
                    .all(|r| self.runs.all(r.clone(), |s| s.has(mark)));
                self.update_styles(&parts, |s| s.set(mark, !all))
            }
            None => {
                let mut style = self.pending_style();
                style.set(mark, !style.has(mark));
                self.set_typing_style(style)
            }
        }
    }

    pub fn set_color(&mut self, color: Color) -> bool {
        match self.format_target() {
            Some(target) => {
                let parts = self.content_ranges(target);
                self.update_styles(&parts, |s| s.color = Some(color))
            }
            None => {
                let mut style = self.pending_style();
                style.color = Some(color);
                self.set_typing_style(style)
            }
        }
    }

    /// Link the selection, or insert `url` as its own linked label when
    /// nothing is selected.
    pub fn set_link(&mut self, url: SafeUrl) -> bool {
        let range = self.selection_range();
        if !range.is_empty() {
            let parts = self.content_ranges(range);
            return self.update_styles(&parts, |s| s.link = Some(url.clone()));
        }

        let mut style = self.pending_style();
        style.link = Some(url.clone());
        self.checkpoint(EditKind::Other);
        let inserted = self.raw_insert(range.start, url.as_str(), style);
        self.set_caret(range.start + inserted);
        self.touch();
        true
    }

    fn set_typing_style(&mut self, style: InlineStyle) -> bool {
        if self.typing_style.as_ref() == Some(&style) {
            return false;
        }
        self.typing_style = Some(style);
        self.touch();
        true
    }

    fn format_target(&self) -> Option<Range<usize>> {
        let range = self.selection_range();
        if !range.is_empty() {
            return Some(range);
        }
        word_range_at(&self.text, range.start)
    }

    /// Split `range` at block breaks, dropping the breaks themselves.
    fn content_ranges(&self, range: Range<usize>) -> Vec<Range<usize>> {
        let first = self.text.char_to_line(range.start);
        let last = self.text.char_to_line(range.end);
        (first..=last)
            .filter_map(|line| {
                let line_range = self.text.line_range(line);
                let start = line_range.start.max(range.start);
                let end = line_range.end.min(range.end);
                (start < end).then_some(start..end)
            })
            .collect()
    }

    fn update_styles(
        &mut self,
        parts: &[Range<usize>],
        mut f: impl FnMut(&mut InlineStyle),
    ) -> bool {
        let before = self.snapshot();
        let mut changed = false;
        for part in parts {
            changed |= self.runs.update(part.clone(), &mut f);
        }
        if changed {
            self.history.record(before, EditKind::Other);
            self.touch();
        }
        changed
    }

    // === Block formatting ===

    /// Give every touched block `kind`, or revert them all to paragraphs when
    /// they already have it.
    pub fn toggle_block_kind(&mut self, kind: BlockKind) -> bool {
        let lines = self.touched_lines();
        let all = self.blocks[lines.clone()].iter().all(|b| b.kind == kind);
        let target = if all { BlockKind::Paragraph } else { kind };
        self.update_blocks(lines, |b| b.kind = target)
    }

    pub fn set_alignment(&mut self, align: Alignment) -> bool {
        let lines = self.touched_lines();
        self.update_blocks(lines, |b| b.align = align)
    }

    /// Lines the selection touches. A selection ending exactly at the start
    /// of a line does not touch that line.
    fn touched_lines(&self) -> RangeInclusive<usize> {
        let range = self.selection_range();
        let first = self.text.char_to_line(range.start);
        let mut last = self.text.char_to_line(range.end);
        if last > first && range.end == self.text.line_to_char(last) {
            last -= 1;
        }
        first..=last
    }

    fn update_blocks(
        &mut self,
        lines: RangeInclusive<usize>,
        f: impl Fn(&mut BlockFormat),
    ) -> bool {
        let before = self.snapshot();
        let mut changed = false;
        for block in &mut self.blocks[lines] {
            let old = *block;
            f(block);
            changed |= old != *block;
        }
        if changed {
            self.history.record(before, EditKind::Other);
            self.touch();
        }
        changed
    }

    // === Layer primitives ===

    fn raw_insert(&mut self, offset: usize, text: &str, style: InlineStyle) -> usize {
        let text = normalize_text(text);
        let len = text.chars().count();
        if len == 0 {
            return 0;
        }
        let line = self.text.char_to_line(offset);
        self.text.insert(offset, &text);
        self.runs.insert_run(offset, StyleRun::text(len, style));

        let breaks = text.chars().filter(|c| *c == '\n').count();
        if breaks > 0 {
            let format = self.blocks.get(line).copied().unwrap_or_default();
            self.blocks
                .splice(line + 1..line + 1, std::iter::repeat_n(format, breaks));
        }
        len
    }

    fn raw_delete(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let first = self.text.char_to_line(range.start);
        let last = self.text.char_to_line(range.end);
        self.text.delete(range.clone());
        self.runs.remove(range);
        if last > first {
            self.blocks.drain(first + 1..=last);
        }
    }

    /// Style for text typed at `offset`: that of the preceding char in the
    /// same block, else the following one. Links only continue when the
    /// caret sits inside one.
    fn inherited_style(&self, offset: usize) -> InlineStyle {
        let line_start = find_line_start(&self.text, offset);
        let prev = (offset > line_start)
            .then(|| self.runs.style_at(offset - 1))
            .flatten();
        let next = self
            .text
            .char_at(offset)
            .filter(|c| *c != '\n')
            .and_then(|_| self.runs.style_at(offset));

        let mut style = prev.or(next).cloned().unwrap_or_default();
        if prev.map(|s| &s.link) != next.map(|s| &s.link) {
            style.link = None;
        }
        style
    }

    /// Style for text replacing a selection that starts at `offset`.
    fn replaced_style(&self, offset: usize) -> InlineStyle {
        match self.text.char_at(offset) {
            Some(c) if c != '\n' && c != OBJECT_REPLACEMENT => {
                self.runs.style_at(offset).cloned().unwrap_or_default()
            }
            _ => self.inherited_style(offset),
        }
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len_chars();
        let (a, b) = (range.start.min(len), range.end.min(len));
        a.min(b)..a.max(b)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            runs: self.runs.clone(),
            blocks: self.blocks.clone(),
            cursor: self.cursor,
            selection: self.selection,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.text = snapshot.text;
        self.runs = snapshot.runs;
        self.blocks = snapshot.blocks;
        self.cursor = snapshot.cursor;
        self.selection = snapshot.selection;
        self.typing_style = None;
    }

    fn checkpoint(&mut self, kind: EditKind) {
        let before = self.snapshot();
        self.history.record(before, kind);
    }

    fn touch(&mut self) {
        self.revision += 1;
        debug_assert_eq!(self.runs.len(), self.text.len_chars());
        debug_assert_eq!(self.blocks.len(), self.text.len_lines());
    }
}

impl UndoManager for RichDocument {
    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn undo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(prev) = self.history.undo(current) else {
            return false;
        };
        self.restore(prev);
        self.touch();
        true
    }

    fn redo(&mut self) -> bool {
        let current = self.snapshot();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.restore(next);
        self.touch();
        true
    }

    fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::HeadingLevel;

    fn doc(text: &str) -> RichDocument {
        RichDocument::from_plain_text(text)
    }

    fn select(doc: &mut RichDocument, range: Range<usize>) {
        doc.set_selection(Some(Selection::new(range.start, range.end)));
    }

    fn assert_layers_aligned(doc: &RichDocument) {
        assert_eq!(doc.runs().len(), doc.len_chars());
        assert_eq!(doc.blocks().len(), doc.text().len_lines());
    }

    #[test]
    fn test_typing_inherits_preceding_style() {
        let mut d = doc("hello");
        select(&mut d, 0..5);
        assert!(d.toggle_mark(Mark::Bold));
        assert!(d.insert_text(5..5, "!"));
        assert!(d.runs().style_at(5).is_some_and(|s| s.bold));
        assert_eq!(d.cursor_offset(), 6);
        assert_layers_aligned(&d);
    }

    #[test]
    fn test_replacing_selection_keeps_its_style() {
        let mut d = doc("one two");
        select(&mut d, 4..7);
        d.toggle_mark(Mark::Italic);
        d.insert_text(4..7, "three");
        assert_eq!(d.plain_text(), "one three");
        assert!(d.runs().all(4..9, |s| s.italic));
        assert!(d.runs().all(0..4, |s| !s.italic));
    }

    #[test]
    fn test_toggle_mark_clears_when_fully_marked() {
        let mut d = doc("abc");
        select(&mut d, 0..3);
        d.toggle_mark(Mark::Bold);
        assert!(d.runs().all(0..3, |s| s.bold));
        d.toggle_mark(Mark::Bold);
        assert!(d.runs().all(0..3, |s| !s.bold));
    }

    #[test]
    fn test_toggle_mark_sets_when_partially_marked() {
        let mut d = doc("abcd");
        select(&mut d, 0..2);
        d.toggle_mark(Mark::Underline);
        select(&mut d, 0..4);
        d.toggle_mark(Mark::Underline);
        assert!(d.runs().all(0..4, |s| s.underline));
    }

    #[test]
    fn test_caret_inside_word_formats_the_word() {
        let mut d = doc("say hello there");
        d.set_cursor_offset(6);
        assert!(d.toggle_mark(Mark::Bold));
        assert!(d.runs().all(4..9, |s| s.bold));
        assert!(d.runs().all(0..4, |s| !s.bold));
        assert!(d.runs().all(9..15, |s| !s.bold));
    }

    #[test]
    fn test_caret_outside_word_sets_typing_style() {
        let mut d = doc("hi ");
        d.set_cursor_offset(3);
        assert!(d.toggle_mark(Mark::Bold));
        assert!(d.typing_style().is_some_and(|s| s.bold));
        assert!(d.runs().all(0..3, |s| !s.bold));

        d.insert_text(3..3, "x");
        assert!(d.runs().style_at(3).is_some_and(|s| s.bold));
        assert!(d.typing_style().is_none());
    }

    #[test]
    fn test_moving_caret_drops_typing_style() {
        let mut d = doc("hi ");
        d.set_cursor_offset(3);
        d.toggle_mark(Mark::Italic);
        d.set_cursor_offset(0);
        assert!(d.typing_style().is_none());
    }

    #[test]
    fn test_newline_insert_splits_blocks() {
        let mut d = doc("ab");
        d.set_cursor_offset(0);
        d.toggle_block_kind(BlockKind::Blockquote);
        d.insert_text(1..1, "x\ny");
        assert_eq!(d.plain_text(), "ax\nyb");
        assert_eq!(d.blocks().len(), 2);
        assert!(d.blocks().iter().all(|b| b.kind == BlockKind::Blockquote));
        assert_layers_aligned(&d);
    }

    #[test]
    fn test_delete_across_blocks_keeps_first_format() {
        let mut d = doc("title\nbody");
        d.set_cursor_offset(0);
        d.toggle_block_kind(BlockKind::Heading(HeadingLevel::H1));
        assert!(d.delete_range(3..8));
        assert_eq!(d.plain_text(), "titdy");
        assert_eq!(d.blocks().len(), 1);
        assert_eq!(d.blocks()[0].kind, BlockKind::Heading(HeadingLevel::H1));
        assert_layers_aligned(&d);
    }

    #[test]
    fn test_enter_after_heading_starts_paragraph() {
        let mut d = doc("Title");
        d.set_cursor_offset(0);
        d.toggle_block_kind(BlockKind::Heading(HeadingLevel::H2));
        assert!(d.split_block(5..5));
        assert_eq!(d.blocks()[0].kind, BlockKind::Heading(HeadingLevel::H2));
        assert_eq!(d.blocks()[1].kind, BlockKind::Paragraph);
        assert_eq!(d.cursor_offset(), 6);
    }

    #[test]
    fn test_enter_mid_heading_keeps_heading() {
        let mut d = doc("Title");
        d.set_cursor_offset(0);
        d.toggle_block_kind(BlockKind::Heading(HeadingLevel::H1));
        d.split_block(2..2);
        assert_eq!(d.plain_text(), "Ti\ntle");
        assert!(
            d.blocks()
                .iter()
                .all(|b| b.kind == BlockKind::Heading(HeadingLevel::H1))
        );
    }

    #[test]
    fn test_enter_in_empty_list_item_leaves_list() {
        let mut d = doc("item");
        d.set_cursor_offset(0);
        d.toggle_block_kind(BlockKind::BulletItem);
        d.split_block(4..4);
        assert_eq!(d.blocks()[1].kind, BlockKind::BulletItem);

        d.split_block(5..5);
        assert_eq!(d.blocks().len(), 2);
        assert_eq!(d.blocks()[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_backspace_at_block_start_unformats_then_merges() {
        let mut d = doc("a\nb");
        d.set_cursor_offset(2);
        d.toggle_block_kind(BlockKind::Blockquote);
        assert_eq!(d.blocks()[1].kind, BlockKind::Blockquote);

        assert!(d.delete_backward(2..2));
        assert_eq!(d.blocks()[1].kind, BlockKind::Paragraph);
        assert_eq!(d.plain_text(), "a\nb");

        assert!(d.delete_backward(2..2));
        assert_eq!(d.plain_text(), "ab");
        assert_eq!(d.cursor_offset(), 1);
    }

    #[test]
    fn test_backspace_at_document_start_is_noop() {
        let mut d = doc("abc");
        assert!(!d.delete_backward(0..0));
        assert!(!d.delete_forward(3..3));
    }

    #[test]
    fn test_delete_removes_whole_emoji() {
        let mut d = doc("x🇩🇪👨\u{200d}👧y");
        assert!(d.delete_backward(6..6));
        assert_eq!(d.plain_text(), "x🇩🇪y");
        assert_eq!(d.cursor_offset(), 3);
        assert!(d.delete_forward(1..1));
        assert_eq!(d.plain_text(), "xy");
        assert_eq!(d.cursor_offset(), 1);
    }

    #[test]
    fn test_toggle_block_kind_reverts_to_paragraph() {
        let mut d = doc("one\ntwo");
        select(&mut d, 0..7);
        assert!(d.toggle_block_kind(BlockKind::NumberedItem));
        assert!(
            d.blocks()
                .iter()
                .all(|b| b.kind == BlockKind::NumberedItem)
        );
        assert!(d.toggle_block_kind(BlockKind::NumberedItem));
        assert!(d.blocks().iter().all(|b| b.kind == BlockKind::Paragraph));
    }

    #[test]
    fn test_selection_ending_at_line_start_excludes_that_line() {
        let mut d = doc("one\ntwo");
        select(&mut d, 0..4);
        d.toggle_block_kind(BlockKind::CodeBlock);
        assert_eq!(d.blocks()[0].kind, BlockKind::CodeBlock);
        assert_eq!(d.blocks()[1].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_alignment_reports_unchanged() {
        let mut d = doc("text");
        assert!(!d.set_alignment(Alignment::Left));
        assert!(d.set_alignment(Alignment::Center));
        assert_eq!(d.current_block().align, Alignment::Center);
    }

    #[test]
    fn test_insert_image_replaces_selection() {
        let mut d = doc("a big cat");
        select(&mut d, 2..5);
        let src = SafeUrl::parse("https://example.com/cat.png").unwrap();
        assert!(d.insert_image(d.selection_range(), src.clone()));
        assert_eq!(d.len_chars(), 7);
        assert_eq!(d.runs().image_at(2), Some(&src));
        assert_eq!(d.plain_text(), "a  cat");
        assert_eq!(d.cursor_offset(), 3);
        assert_layers_aligned(&d);
    }

    #[test]
    fn test_link_on_collapsed_caret_inserts_url() {
        let mut d = doc("see ");
        d.set_cursor_offset(4);
        let url = SafeUrl::parse("https://example.com").unwrap();
        assert!(d.set_link(url.clone()));
        assert_eq!(d.plain_text(), "see https://example.com");
        assert!(d.runs().all(4..23, |s| s.link.as_ref() == Some(&url)));

        // Typing after the link does not extend it.
        d.insert_text(23..23, "!");
        assert_eq!(d.runs().style_at(23).and_then(|s| s.link.clone()), None);
    }

    #[test]
    fn test_link_on_selection() {
        let mut d = doc("click here");
        select(&mut d, 6..10);
        let url = SafeUrl::parse("/docs").unwrap();
        assert!(d.set_link(url.clone()));
        assert_eq!(d.plain_text(), "click here");
        assert!(d.runs().all(6..10, |s| s.link.as_ref() == Some(&url)));
        assert!(d.runs().all(0..6, |s| s.link.is_none()));
    }

    #[test]
    fn test_formatting_skips_block_breaks() {
        let mut d = doc("ab\ncd");
        select(&mut d, 0..5);
        d.set_color(Color::rgb(255, 0, 0));
        assert!(d.runs().style_at(2).is_some_and(|s| s.color.is_none()));
        assert!(d.runs().all(0..2, |s| s.color == Some(Color::rgb(255, 0, 0))));
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut d = doc("hello");
        select(&mut d, 0..5);
        d.toggle_mark(Mark::Bold);
        d.insert_text(5..5, " world");
        assert!(d.can_undo());

        assert!(d.undo());
        assert_eq!(d.plain_text(), "hello");
        assert!(d.runs().all(0..5, |s| s.bold));

        assert!(d.undo());
        assert!(d.runs().all(0..5, |s| !s.bold));
        assert!(!d.undo());

        assert!(d.redo());
        assert!(d.redo());
        assert_eq!(d.plain_text(), "hello world");
        assert!(!d.can_redo());
    }

    #[test]
    fn test_typing_is_one_undo_step() {
        let mut d = RichDocument::new();
        for (i, c) in "word".chars().enumerate() {
            d.insert_text(i..i, &c.to_string());
        }
        assert!(d.undo());
        assert!(d.is_empty());
        assert!(!d.can_undo());
    }

    #[test]
    fn test_undo_depth_is_bounded() {
        let mut d = RichDocument::with_undo_depth(2);
        d.insert_text(0..0, "a\n");
        d.insert_text(2..2, "b\n");
        d.insert_text(4..4, "c\n");
        assert!(d.undo());
        assert!(d.undo());
        assert!(!d.undo());
        assert_eq!(d.plain_text(), "a\n");
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut d = RichDocument::new();
        let r0 = d.revision();
        d.insert_text(0..0, "x");
        assert!(d.revision() > r0);
        let r1 = d.revision();
        d.set_cursor_offset(1);
        assert_eq!(d.revision(), r1);
    }
}
