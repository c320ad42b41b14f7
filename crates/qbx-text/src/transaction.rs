#![forbid(unsafe_code)]

//! Structured edits with cursor remapping.
//!
//! A [`Transaction`] is an ordered batch of [`EditOp`]s applied atomically
//! against a buffer snapshot. Offsets are char offsets (the host input's
//! selection unit) and each operation addresses the buffer as it stands
//! after the operations before it in the same transaction.
//!
//! Cursor remapping follows one rule per operation kind:
//! - an insertion at `i` shifts every cursor strictly after `i` forward by
//!   the inserted length; a cursor sitting exactly at `i` stays put
//! - a deletion of `[i, i + l)` pulls every cursor strictly after `i` back
//!   by `l`, clamped so it never lands before `i`
//!
//! Operations are pure and total for well-formed inputs. Offsets outside
//! the buffer are a caller bug, not a runtime condition; they are clamped
//! to the buffer end rather than recovered from.

use smallvec::SmallVec;

/// Byte offset of the given char offset in `s`.
///
/// Char offsets past the end of the string map to `s.len()`.
#[must_use]
pub fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map_or(s.len(), |(byte, _)| byte)
}

/// An ordered pair of char offsets into the buffer: a caret when
/// `start == end`, otherwise a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a range, swapping the ends if they arrive out of order.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A collapsed range (caret) at the given offset.
    #[must_use]
    pub const fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Whether the range is a caret (empty selection).
    #[must_use]
    pub const fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Number of chars covered by the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no chars. Same as [`Self::is_caret`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// The range moved forward by independent per-end amounts.
    #[must_use]
    pub const fn advanced(self, start_by: usize, end_by: usize) -> Self {
        Self {
            start: self.start + start_by,
            end: self.end + end_by,
        }
    }
}

/// A single edit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Insert `text` so its first char lands at char offset `at`.
    Insert {
        /// Char offset of the insertion point.
        at: usize,
        /// Text to insert.
        text: String,
    },
    /// Delete `len` chars starting at char offset `at`.
    Delete {
        /// Char offset of the first deleted char.
        at: usize,
        /// Number of chars to delete.
        len: usize,
    },
}

/// An ordered batch of operations applied atomically.
///
/// Nearly every transaction in practice is one or two operations (a list
/// continuation is one insert, a bold wrap is two), so the op list is a
/// small-vector that stays inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    ops: SmallVec<[EditOp; 2]>,
}

impl Transaction {
    /// Create an empty transaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an insertion. Returns `self` for chaining.
    pub fn insert(&mut self, at: usize, text: impl Into<String>) -> &mut Self {
        self.ops.push(EditOp::Insert {
            at,
            text: text.into(),
        });
        self
    }

    /// Queue a deletion. Returns `self` for chaining.
    pub fn delete(&mut self, at: usize, len: usize) -> &mut Self {
        self.ops.push(EditOp::Delete { at, len });
        self
    }

    /// Whether any operations are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The queued operations, in application order.
    #[must_use]
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Apply every operation in order, returning the new buffer and the
    /// cursors remapped through each operation.
    #[must_use]
    pub fn apply(&self, value: &str, cursors: SelectionRange) -> (String, SelectionRange) {
        let mut out = value.to_string();
        let mut cursors = cursors;
        for op in &self.ops {
            match op {
                EditOp::Insert { at, text } => {
                    out.insert_str(byte_offset(&out, *at), text);
                    let inserted = text.chars().count();
                    cursors = SelectionRange {
                        start: remap_insert(cursors.start, *at, inserted),
                        end: remap_insert(cursors.end, *at, inserted),
                    };
                }
                EditOp::Delete { at, len } => {
                    let from = byte_offset(&out, *at);
                    let to = byte_offset(&out, at + len);
                    out.replace_range(from..to, "");
                    cursors = SelectionRange {
                        start: remap_delete(cursors.start, *at, *len),
                        end: remap_delete(cursors.end, *at, *len),
                    };
                }
            }
        }
        (out, cursors)
    }
}

/// Shift rule for insertions: strictly-after cursors move forward.
const fn remap_insert(cursor: usize, at: usize, inserted: usize) -> usize {
    if at < cursor { cursor + inserted } else { cursor }
}

/// Shift rule for deletions: strictly-after cursors move back, clamped to
/// the deletion start.
const fn remap_delete(cursor: usize, at: usize, len: usize) -> usize {
    if at < cursor {
        let shifted = cursor.saturating_sub(len);
        if shifted > at { shifted } else { at }
    } else {
        cursor
    }
}
