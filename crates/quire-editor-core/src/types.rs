//! Caret and selection positions.
//!
//! Offsets count Unicode scalar values in the document text, the same unit
//! the rope indexes by.

use std::ops::Range;

#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub offset: usize,
}

impl CursorState {
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }
}

/// A selection keeps its direction: `anchor` stays put while `head` follows
/// the caret, so `head` may come before `anchor`.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn collapsed(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Covered offsets, lowest first.
    pub fn to_range(&self) -> Range<usize> {
        if self.head < self.anchor {
            self.head..self.anchor
        } else {
            self.anchor..self.head
        }
    }

    /// Pull both ends back inside a document of length `max`.
    pub fn clamped(self, max: usize) -> Self {
        Self::new(self.anchor.min(max), self.head.min(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_selection_range() {
        assert_eq!(Selection::new(10, 5).to_range(), 5..10);
        assert_eq!(Selection::new(5, 10).to_range(), 5..10);
    }

    #[test]
    fn test_collapsed() {
        let sel = Selection::collapsed(7);
        assert!(sel.is_collapsed());
        assert_eq!(sel.to_range(), 7..7);
    }

    #[test]
    fn test_clamped_keeps_direction() {
        assert_eq!(Selection::new(12, 3).clamped(8), Selection::new(8, 3));
    }
}
