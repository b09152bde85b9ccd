//! Run-length inline formatting.
//!
//! `StyleRuns` covers every char of the text buffer exactly once. Text runs
//! with equal styles are merged after each mutation; image runs are always a
//! single char long and never merged with anything.

use std::ops::Range;

use crate::style::InlineStyle;
use crate::url::SafeUrl;

/// A contiguous stretch of chars sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRun {
    pub len: usize,
    pub style: InlineStyle,
    /// Set for the one-char run occupying an inline image slot.
    pub image: Option<SafeUrl>,
}

impl StyleRun {
    pub fn text(len: usize, style: InlineStyle) -> Self {
        Self {
            len,
            style,
            image: None,
        }
    }

    pub fn image(src: SafeUrl, style: InlineStyle) -> Self {
        Self {
            len: 1,
            style,
            image: Some(src),
        }
    }

    fn merges_with(&self, other: &StyleRun) -> bool {
        self.image.is_none() && other.image.is_none() && self.style == other.style
    }
}

/// A borrowed view of a run clipped to a queried range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub start: usize,
    pub len: usize,
    pub style: &'a InlineStyle,
    pub image: Option<&'a SafeUrl>,
}

impl Segment<'_> {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleRuns {
    runs: Vec<StyleRun>,
}

impl StyleRuns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs covering `len` chars of unstyled text.
    pub fn plain(len: usize) -> Self {
        let mut runs = Self::new();
        runs.insert_run(0, StyleRun::text(len, InlineStyle::default()));
        runs
    }

    /// Total covered length in chars.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|r| r.len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    /// Style of the char at `offset`.
    pub fn style_at(&self, offset: usize) -> Option<&InlineStyle> {
        self.run_at(offset).map(|r| &r.style)
    }

    /// Image source when the char at `offset` is an image slot.
    pub fn image_at(&self, offset: usize) -> Option<&SafeUrl> {
        self.run_at(offset).and_then(|r| r.image.as_ref())
    }

    fn run_at(&self, offset: usize) -> Option<&StyleRun> {
        let mut pos = 0;
        for run in &self.runs {
            if offset < pos + run.len {
                return Some(run);
            }
            pos += run.len;
        }
        None
    }

    /// Insert a run at `offset`, shifting everything after it.
    pub fn insert_run(&mut self, offset: usize, run: StyleRun) {
        if run.len == 0 {
            return;
        }
        let offset = offset.min(self.len());
        let idx = self.split_at(offset);
        self.runs.insert(idx, run);
        self.normalize();
    }

    /// Remove the styling of `range`, shifting everything after it.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.len();
        let (start, end) = (range.start.min(len), range.end.min(len));
        if start >= end {
            return;
        }
        let first = self.split_at(start);
        let last = self.split_at(end);
        self.runs.drain(first..last);
        self.normalize();
    }

    /// Apply `f` to the style of every run inside `range`.
    ///
    /// Returns whether any style actually changed.
    pub fn update(&mut self, range: Range<usize>, mut f: impl FnMut(&mut InlineStyle)) -> bool {
        let len = self.len();
        let (start, end) = (range.start.min(len), range.end.min(len));
        if start >= end {
            return false;
        }
        let first = self.split_at(start);
        let last = self.split_at(end);
        let mut changed = false;
        for run in &mut self.runs[first..last] {
            let before = run.style.clone();
            f(&mut run.style);
            changed |= before != run.style;
        }
        self.normalize();
        changed
    }

    /// Whether every char in `range` satisfies `pred`. Vacuously true when
    /// the range is empty.
    pub fn all(&self, range: Range<usize>, pred: impl Fn(&InlineStyle) -> bool) -> bool {
        self.segments(range).iter().all(|seg| pred(seg.style))
    }

    /// Runs intersecting `range`, clipped to it.
    pub fn segments(&self, range: Range<usize>) -> Vec<Segment<'_>> {
        let mut out = Vec::new();
        let mut pos = 0;
        for run in &self.runs {
            let run_end = pos + run.len;
            let start = pos.max(range.start);
            let end = run_end.min(range.end);
            if start < end {
                out.push(Segment {
                    start,
                    len: end - start,
                    style: &run.style,
                    image: run.image.as_ref(),
                });
            }
            if run_end >= range.end {
                break;
            }
            pos = run_end;
        }
        out
    }

    /// Ensure a run boundary at `offset` and return the index of the run
    /// starting there (or `runs.len()` at the end).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut pos = 0;
        for i in 0..self.runs.len() {
            if offset == pos {
                return i;
            }
            let len = self.runs[i].len;
            if offset < pos + len {
                let head = offset - pos;
                let mut tail = self.runs[i].clone();
                tail.len = len - head;
                self.runs[i].len = head;
                self.runs.insert(i + 1, tail);
                return i + 1;
            }
            pos += len;
        }
        self.runs.len()
    }

    fn normalize(&mut self) {
        self.runs.retain(|r| r.len > 0);
        let mut merged: Vec<StyleRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.merges_with(&run) => prev.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> InlineStyle {
        InlineStyle {
            bold: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_update_splits_and_merges() {
        let mut runs = StyleRuns::plain(10);
        assert!(runs.update(2..5, |s| s.bold = true));
        assert_eq!(runs.runs().len(), 3);
        assert_eq!(runs.len(), 10);
        assert_eq!(runs.style_at(2), Some(&bold()));
        assert_eq!(runs.style_at(5), Some(&InlineStyle::default()));

        // Clearing the mark again collapses back into one run.
        assert!(runs.update(0..10, |s| s.bold = false));
        assert_eq!(runs.runs().len(), 1);
    }

    #[test]
    fn test_update_reports_no_change() {
        let mut runs = StyleRuns::plain(4);
        assert!(!runs.update(0..4, |s| s.bold = false));
        assert!(!runs.update(3..3, |s| s.bold = true));
    }

    #[test]
    fn test_insert_and_remove_keep_length() {
        let mut runs = StyleRuns::plain(4);
        runs.insert_run(2, StyleRun::text(3, bold()));
        assert_eq!(runs.len(), 7);
        assert_eq!(runs.style_at(4), Some(&bold()));

        runs.remove(1..4);
        assert_eq!(runs.len(), 4);
        assert_eq!(
            runs.segments(0..4)
                .iter()
                .map(|s| (s.start, s.len, s.style.bold))
                .collect::<Vec<_>>(),
            vec![(0, 1, false), (1, 1, true), (2, 2, false)]
        );
    }

    #[test]
    fn test_images_never_merge() {
        let src = SafeUrl::parse("/a.png").unwrap();
        let mut runs = StyleRuns::new();
        runs.insert_run(0, StyleRun::image(src.clone(), InlineStyle::default()));
        runs.insert_run(1, StyleRun::image(src.clone(), InlineStyle::default()));
        assert_eq!(runs.runs().len(), 2);
        assert_eq!(runs.image_at(1), Some(&src));
        assert_eq!(runs.image_at(2), None);
    }

    #[test]
    fn test_all_is_vacuous_on_empty_range() {
        let runs = StyleRuns::plain(3);
        assert!(runs.all(1..1, |s| s.bold));
        assert!(!runs.all(0..3, |s| s.bold));
    }
}
