#![forbid(unsafe_code)]

//! Coalescing of free typing into single undo steps.
//!
//! Typing "hello" character by character must undo as one step, not five.
//! [`InputCoalescer`] keeps at most one open [`PendingGroup`]: the first
//! raw edit after the previous group closed opens it, pinning the pre-edit
//! buffer and the last tracked cursors as the group's "before" side. Every
//! further raw edit inside the idle window refreshes the timer and updates
//! the group's "latest" snapshot; the pinned "before" never moves.
//!
//! A group closes into one [`EditRecord`] when the idle timer fires, or
//! when a structured command or undo/redo forces a flush. Input is never
//! delayed by coalescing - the caller republishes each raw edit
//! immediately and only the undo grouping is deferred.

use std::time::Duration;

use tracing::debug;

use qbx_core::IdleTimer;

use crate::history::{EditRecord, Snapshot};

/// The open, uncommitted typing group.
#[derive(Debug, Clone)]
struct PendingGroup {
    /// State captured when the group opened; the record's undo side.
    before: Snapshot,
    /// State after the most recent raw edit; the record's redo side.
    latest: Snapshot,
}

/// Groups rapid raw edits into one [`EditRecord`] per idle window.
#[derive(Debug, Clone)]
pub struct InputCoalescer {
    pending: Option<PendingGroup>,
    timer: IdleTimer,
}

impl Default for InputCoalescer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_IDLE_WINDOW)
    }
}

impl InputCoalescer {
    /// Idle window after which an open typing group closes.
    pub const DEFAULT_IDLE_WINDOW: Duration = Duration::from_millis(500);

    /// Create a coalescer with the given idle window.
    #[must_use]
    pub fn new(idle_window: Duration) -> Self {
        Self {
            pending: None,
            timer: IdleTimer::new(idle_window),
        }
    }

    /// Whether a typing group is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a raw edit.
    ///
    /// Opens a group pinned to `before` if none is open; otherwise the
    /// existing group's pinned snapshot stays. Either way `latest` becomes
    /// the group's redo side and the idle timer is refreshed.
    pub fn observe(&mut self, before: Snapshot, latest: Snapshot) {
        match &mut self.pending {
            Some(group) => group.latest = latest,
            None => {
                debug!(cursors = ?before.cursors, "open typing group");
                self.pending = Some(PendingGroup { before, latest });
            }
        }
        self.timer.arm();
    }

    /// Advance the idle timer; closes the group when the window elapses.
    pub fn tick(&mut self, dt: Duration) -> Option<EditRecord> {
        if self.timer.tick(dt) {
            self.close()
        } else {
            None
        }
    }

    /// Force-close the open group, cancelling its timer.
    ///
    /// Called ahead of structured commands and undo/redo so free typing
    /// stays a discrete undo unit, never interleaved with them.
    pub fn flush(&mut self) -> Option<EditRecord> {
        self.timer.cancel();
        self.close()
    }

    fn close(&mut self) -> Option<EditRecord> {
        let group = self.pending.take()?;
        debug!("close typing group");
        Some(EditRecord {
            before: group.before,
            after: group.latest,
        })
    }
}
