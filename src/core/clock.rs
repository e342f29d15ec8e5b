//! Time source for the engine.
//!
//! Production code reads the local wall clock; tests and the CLI driver use
//! a [`ManualClock`] they can advance by hand.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    /// Current local time.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current time as epoch milliseconds.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Rc<Cell<i64>>,
    offset: FixedOffset,
}

impl ManualClock {
    /// Clock at `start_ms`, in UTC.
    pub fn new(start_ms: i64) -> Self {
        Self {
            millis: Rc::new(Cell::new(start_ms)),
            offset: Utc.fix(),
        }
    }

    /// Clock at `start_ms` in the given fixed offset (for hour-of-day rules).
    pub fn with_offset(start_ms: i64, offset: FixedOffset) -> Self {
        Self {
            millis: Rc::new(Cell::new(start_ms)),
            offset,
        }
    }

    pub fn advance(&self, ms: u64) {
        let ms = i64::try_from(ms).unwrap_or(i64::MAX);
        self.millis.set(self.millis.get().saturating_add(ms));
    }

    pub fn set(&self, ms: i64) {
        self.millis.set(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        DateTime::from_timestamp_millis(self.millis.get())
            .unwrap_or_default()
            .with_timezone(&self.offset)
    }

    fn now_ms(&self) -> i64 {
        self.millis.get()
    }
}
