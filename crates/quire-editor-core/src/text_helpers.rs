//! Text navigation helpers.
//!
//! These functions work over any `TextBuffer` and provide the word and line
//! boundaries used by deletion commands and caret formatting.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use crate::text::TextBuffer;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// Find start of line containing offset.
pub fn find_line_start<T: TextBuffer>(buf: &T, offset: usize) -> usize {
    buf.line_to_char(buf.char_to_line(offset))
}

/// Find end of line containing offset (position of newline or end of text).
pub fn find_line_end<T: TextBuffer>(buf: &T, offset: usize) -> usize {
    buf.line_range(buf.char_to_line(offset)).end
}

/// Find word boundary backward from cursor.
pub fn find_word_boundary_backward<T: TextBuffer>(buf: &T, cursor: usize) -> usize {
    let mut pos = cursor.min(buf.len_chars());

    // Skip whitespace/punctuation immediately before the cursor.
    while pos > 0 {
        match buf.char_at(pos - 1) {
            Some('\n') if pos < cursor => return pos,
            Some(c) if is_word_char(c) => break,
            Some(_) => pos -= 1,
            None => break,
        }
    }

    while pos > 0 {
        match buf.char_at(pos - 1) {
            Some(c) if is_word_char(c) => pos -= 1,
            _ => break,
        }
    }

    pos
}

/// Find word boundary forward from cursor.
pub fn find_word_boundary_forward<T: TextBuffer>(buf: &T, cursor: usize) -> usize {
    let len = buf.len_chars();
    let mut pos = cursor.min(len);

    while pos < len {
        match buf.char_at(pos) {
            Some(c) if is_word_char(c) => pos += 1,
            _ => break,
        }
    }

    while pos < len {
        match buf.char_at(pos) {
            Some('\n') if pos > cursor => return pos,
            Some(c) if is_word_char(c) => break,
            Some(_) => pos += 1,
            None => break,
        }
    }

    pos
}

/// Start of the grapheme cluster that ends at `offset`.
///
/// Clusters never cross a block break, so only the current line is
/// segmented. At a line start this is the preceding `\n`.
pub fn prev_grapheme_boundary<T: TextBuffer>(buf: &T, offset: usize) -> usize {
    let offset = offset.min(buf.len_chars());
    let line_start = find_line_start(buf, offset);
    if offset <= line_start {
        return offset.saturating_sub(1);
    }
    let cluster = buf
        .slice(line_start..offset)
        .and_then(|before| before.graphemes(true).next_back().map(|g| g.chars().count()))
        .unwrap_or(1);
    offset - cluster
}

/// End of the grapheme cluster that starts at `offset`.
pub fn next_grapheme_boundary<T: TextBuffer>(buf: &T, offset: usize) -> usize {
    let len = buf.len_chars();
    if offset >= len {
        return len;
    }
    let line_end = find_line_end(buf, offset);
    if offset >= line_end {
        return offset + 1;
    }
    let cluster = buf
        .slice(offset..line_end)
        .and_then(|after| after.graphemes(true).next().map(|g| g.chars().count()))
        .unwrap_or(1);
    offset + cluster
}

/// Range of the word the caret sits strictly inside of.
///
/// A caret at either edge of a word is not inside it, so formatting applied
/// there falls through to the typing style instead.
pub fn word_range_at<T: TextBuffer>(buf: &T, offset: usize) -> Option<Range<usize>> {
    if offset == 0 {
        return None;
    }
    let before = buf.char_at(offset - 1).is_some_and(is_word_char);
    let after = buf.char_at(offset).is_some_and(is_word_char);
    if !(before && after) {
        return None;
    }

    let mut start = offset;
    while start > 0 && buf.char_at(start - 1).is_some_and(is_word_char) {
        start -= 1;
    }
    let mut end = offset;
    while buf.char_at(end).is_some_and(is_word_char) {
        end += 1;
    }
    Some(start..end)
}
