//! Text buffer abstraction for document storage.
//!
//! The `TextBuffer` trait is the plain-text half of a rich document: blocks
//! are separated by `\n` and inline objects (images) occupy a single
//! U+FFFC character. Formatting lives alongside, in style runs and block
//! formats, which are kept aligned to the char offsets of this buffer.

use smol_str::{SmolStr, ToSmolStr};
use std::ops::Range;

/// Placeholder character occupying the slot of an inline image.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Editable plain text with line lookup. Offsets are chars.
pub trait TextBuffer {
    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Offsets past the end insert at the end.
    fn insert(&mut self, char_offset: usize, text: &str);

    /// The range is clamped to the buffer.
    fn delete(&mut self, char_range: Range<usize>);

    /// `None` when the range does not fit the buffer.
    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr>;

    fn char_at(&self, char_offset: usize) -> Option<char>;

    fn to_string(&self) -> String;

    /// Number of `\n`-separated lines. An empty buffer has one line.
    fn len_lines(&self) -> usize;

    /// Index of the line containing `char_offset`.
    ///
    /// An offset directly after a `\n` belongs to the following line.
    fn char_to_line(&self, char_offset: usize) -> usize;

    /// Char offset of the first character of `line`.
    fn line_to_char(&self, line: usize) -> usize;

    /// Char range of `line`, excluding its trailing `\n`.
    fn line_range(&self, line: usize) -> Range<usize> {
        let start = self.line_to_char(line);
        let end = if line + 1 < self.len_lines() {
            self.line_to_char(line + 1) - 1
        } else {
            self.len_chars()
        };
        start..end
    }
}

/// The document text, stored in a `ropey::Rope`.
#[derive(Clone, Default, Debug)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Line breaks are normalized to `\n`.
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(&normalize_text(s)),
        }
    }

    pub fn rope(&self) -> &ropey::Rope {
        &self.rope
    }
}

impl PartialEq for EditorRope {
    fn eq(&self, other: &Self) -> bool {
        self.rope == other.rope
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn insert(&mut self, char_offset: usize, text: &str) {
        let offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    fn delete(&mut self, char_range: Range<usize>) {
        let len = self.rope.len_chars();
        let range = char_range.start.min(len)..char_range.end.min(len);
        if !range.is_empty() {
            self.rope.remove(range);
        }
    }

    fn slice(&self, char_range: Range<usize>) -> Option<SmolStr> {
        if char_range.end > self.len_chars() || char_range.start > char_range.end {
            return None;
        }
        Some(self.rope.slice(char_range).to_smolstr())
    }

    fn char_at(&self, char_offset: usize) -> Option<char> {
        if char_offset >= self.len_chars() {
            return None;
        }
        Some(self.rope.char(char_offset))
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    fn char_to_line(&self, char_offset: usize) -> usize {
        self.rope.char_to_line(char_offset.min(self.rope.len_chars()))
    }

    fn line_to_char(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.rope.len_lines()))
    }
}

/// Normalize text before it enters a buffer.
///
/// Every line-break flavour ropey recognizes becomes `\n` so that one line is
/// exactly one block, and stray object-replacement characters are dropped
/// because that code point is reserved for images.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => out.push('\n'),
            OBJECT_REPLACEMENT => {}
            c => out.push(c),
        }
    }
    out
}

impl From<&str> for EditorRope {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut rope = EditorRope::from_str("hello world");
        assert_eq!(rope.len_chars(), 11);

        rope.insert(5, " beautiful");
        assert_eq!(rope.to_string(), "hello beautiful world");

        rope.delete(5..15);
        assert_eq!(rope.to_string(), "hello world");
    }

    #[test]
    fn test_char_at_and_slice() {
        let rope = EditorRope::from_str("hello");
        assert_eq!(rope.char_at(0), Some('h'));
        assert_eq!(rope.char_at(5), None);
        assert_eq!(rope.slice(1..3).as_deref(), Some("el"));
        assert_eq!(rope.slice(0..100), None);
    }

    #[test]
    fn test_lines() {
        let rope = EditorRope::from_str("one\ntwo\n");
        assert_eq!(rope.len_lines(), 3);
        assert_eq!(rope.char_to_line(3), 0); // the newline itself
        assert_eq!(rope.char_to_line(4), 1);
        assert_eq!(rope.line_range(0), 0..3);
        assert_eq!(rope.line_range(1), 4..7);
        assert_eq!(rope.line_range(2), 8..8);
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let rope = EditorRope::new();
        assert_eq!(rope.len_lines(), 1);
        assert_eq!(rope.line_range(0), 0..0);
    }

    #[test]
    fn test_normalize_line_breaks() {
        assert_eq!(normalize_text("a\r\nb\rc\u{2028}d"), "a\nb\nc\nd");
        assert_eq!(normalize_text("x\u{FFFC}y"), "xy");
    }
}
