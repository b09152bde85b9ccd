//! Undo/redo management for editor operations.
//!
//! Provides:
//! - `UndoManager` trait for abstracting undo implementations
//! - `History<S>` - bounded snapshot stacks with typing coalescing

use std::time::Duration;

use web_time::Instant;

/// Consecutive typing within this window collapses into one undo step.
pub const TYPING_COALESCE_WINDOW: Duration = Duration::from_millis(1000);

/// Trait for managing undo/redo operations.
///
/// Implementations must actually perform the undo/redo, not just track state.
pub trait UndoManager {
    /// Check if undo is available.
    fn can_undo(&self) -> bool;

    /// Check if redo is available.
    fn can_redo(&self) -> bool;

    /// Perform undo. Returns true if successful.
    fn undo(&mut self) -> bool;

    /// Perform redo. Returns true if successful.
    fn redo(&mut self) -> bool;

    /// Clear all undo/redo history.
    fn clear_history(&mut self);
}

/// What kind of edit is about to be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// A single typed character at `end`, the caret position after it.
    Typing { end: usize },
    /// Anything else: deletion, paste, formatting, structure.
    Other,
}

/// Bounded undo and redo stacks of document snapshots.
///
/// The owner pushes the state *before* each mutation via [`History::record`]
/// and swaps states through [`History::undo`] / [`History::redo`].
#[derive(Debug, Clone)]
pub struct History<S> {
    undo_stack: Vec<S>,
    redo_stack: Vec<S>,
    max_steps: usize,
    last_typing: Option<(usize, Instant)>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self::new(100)
    }
}

impl<S> History<S> {
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps: max_steps.max(1),
            last_typing: None,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Record the state preceding an edit.
    pub fn record(&mut self, before: S, kind: EditKind) {
        self.record_at(before, kind, Instant::now());
    }

    /// Record with an explicit timestamp.
    ///
    /// A typing edit that continues directly after the previous one within
    /// [`TYPING_COALESCE_WINDOW`] is folded into the existing step.
    pub fn record_at(&mut self, before: S, kind: EditKind, now: Instant) {
        self.redo_stack.clear();

        if let EditKind::Typing { end } = kind {
            let continues = self.last_typing.is_some_and(|(prev_end, at)| {
                end == prev_end + 1 && now.duration_since(at) <= TYPING_COALESCE_WINDOW
            });
            self.last_typing = Some((end, now));
            if continues && self.can_undo() {
                return;
            }
        } else {
            self.last_typing = None;
        }

        self.undo_stack.push(before);
        if self.undo_stack.len() > self.max_steps {
            let excess = self.undo_stack.len() - self.max_steps;
            self.undo_stack.drain(..excess);
        }
    }

    /// Pop the newest undo state, parking `current` on the redo stack.
    pub fn undo(&mut self, current: S) -> Option<S> {
        let prev = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        self.last_typing = None;
        Some(prev)
    }

    /// Pop the newest redo state, parking `current` on the undo stack.
    pub fn redo(&mut self, current: S) -> Option<S> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        self.last_typing = None;
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.last_typing = None;
    }
}
