#![forbid(unsafe_code)]

//! Deferred single-value scheduling.
//!
//! [`Deferred`] is a one-slot queue for work that must run after the
//! current render/update cycle completes. The edit box schedules its
//! selection restore here; the host drains the slot once it has re-rendered
//! the published value, which guarantees the restore lands after the
//! content update instead of racing the input's native caret placement.
//!
//! Scheduling again before the slot is drained replaces the pending value -
//! only the latest restore matters.

/// A single pending value, drained by the host after the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    pending: Option<T>,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deferred<T> {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule a value, replacing any pending one.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some(value);
    }

    /// Take the pending value, leaving the slot empty.
    #[must_use]
    pub fn take(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Drop any pending value without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting.
    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }
}
