#![forbid(unsafe_code)]

//! Idle-deadline timer.
//!
//! [`IdleTimer`] tracks a single deadline used to close a coalescing group
//! once input goes quiet. Time is supplied by the host through
//! [`IdleTimer::tick`] - the timer never reads a clock itself, so tests
//! drive it by advancing simulated time instead of sleeping.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use qbx_core::IdleTimer;
//!
//! let mut timer = IdleTimer::new(Duration::from_millis(500));
//! timer.arm();
//! assert!(!timer.tick(Duration::from_millis(200)));
//! timer.arm(); // more input: deadline pushed out again
//! assert!(!timer.tick(Duration::from_millis(400)));
//! assert!(timer.tick(Duration::from_millis(100))); // idle window elapsed
//! assert!(!timer.is_armed());
//! ```

use std::time::Duration;

/// A host-driven one-shot idle deadline.
///
/// Tracks elapsed time as [`Duration`] internally for precise accumulation.
/// Re-arming resets the elapsed time, which is what refreshing an idle
/// window means. At most one deadline is pending at a time.
#[derive(Debug, Clone, Copy)]
pub struct IdleTimer {
    window: Duration,
    elapsed: Duration,
    armed: bool,
}

impl IdleTimer {
    /// Create a disarmed timer with the given idle window.
    ///
    /// A zero window is bumped to one nanosecond so an armed timer never
    /// fires without at least one tick.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window: if window.is_zero() {
                Duration::from_nanos(1)
            } else {
                window
            },
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    /// Arm the timer, or push the deadline out if already armed.
    pub fn arm(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = true;
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = false;
    }

    /// Whether a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// The configured idle window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Advance time by `dt`.
    ///
    /// Returns `true` exactly once, on the tick where the idle window
    /// elapses; the timer disarms itself at that point. A disarmed timer
    /// always returns `false`.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.window {
            self.cancel();
            true
        } else {
            false
        }
    }
}
