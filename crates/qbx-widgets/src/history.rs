#![forbid(unsafe_code)]

//! Undo/redo history.
//!
//! Each [`EditRecord`] holds the full buffer and cursors on both sides of
//! one reversible step. Records come from two producers: the command
//! dispatcher (one record per structured edit) and the input coalescer
//! (one record per closed typing group). The stacks are LIFO; a record
//! pushed by any new edit invalidates the redo stack, so redo is only
//! reachable immediately after undos.

use qbx_text::SelectionRange;
use tracing::trace;

/// The buffer and cursors at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Full buffer content.
    pub value: String,
    /// Selection at that instant.
    pub cursors: SelectionRange,
}

impl Snapshot {
    /// Create a snapshot.
    #[must_use]
    pub fn new(value: impl Into<String>, cursors: SelectionRange) -> Self {
        Self {
            value: value.into(),
            cursors,
        }
    }
}

/// One reversible step: the state to restore on undo and on redo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    /// State before the edit (restored by undo).
    pub before: Snapshot,
    /// State after the edit (restored by redo).
    pub after: Snapshot,
}

/// LIFO undo and redo stacks of [`EditRecord`]s.
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<EditRecord>,
    redo: Vec<EditRecord>,
    /// Maximum undo history depth.
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum number of retained undo steps.
    pub const DEFAULT_MAX_DEPTH: usize = 1000;

    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum undo depth. The oldest records are dropped first.
    pub fn set_max_depth(&mut self, max: usize) {
        self.max_depth = max.max(1);
        let excess = self.undo.len().saturating_sub(self.max_depth);
        if excess > 0 {
            self.undo.drain(..excess);
        }
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Push a record for a new edit. Clears the redo stack: history does
    /// not branch.
    pub fn record(&mut self, record: EditRecord) {
        trace!(
            undo_depth = self.undo.len() + 1,
            discarded_redo = self.redo.len(),
            "record edit"
        );
        self.undo.push(record);
        if self.undo.len() > self.max_depth {
            self.undo.remove(0);
        }
        self.redo.clear();
    }

    /// Pop the most recent edit, moving it to the redo stack.
    ///
    /// Returns the snapshot to display, or `None` when there is nothing to
    /// undo (which is not an error: the user just sees no change).
    pub fn undo(&mut self) -> Option<Snapshot> {
        let record = self.undo.pop()?;
        let snapshot = record.before.clone();
        self.redo.push(record);
        trace!(undo_depth = self.undo.len(), "undo");
        Some(snapshot)
    }

    /// Pop the most recently undone edit, moving it back to the undo stack.
    ///
    /// Returns the snapshot to display, or `None` when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let record = self.redo.pop()?;
        let snapshot = record.after.clone();
        self.undo.push(record);
        trace!(undo_depth = self.undo.len(), "redo");
        Some(snapshot)
    }
}
