//! Nullable clock: deterministic time for testing.

use parcel_types::Timestamp;
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Advance time by a number of seconds and return the new time.
    pub fn advance(&self, secs: u64) -> Timestamp {
        self.current.set(self.current.get().saturating_add(secs));
        self.now()
    }

    /// Jump to one second past `deadline`, the first instant it counts as passed.
    pub fn pass(&self, deadline: Timestamp) -> Timestamp {
        self.current.set(deadline.as_secs().saturating_add(1));
        self.now()
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}
