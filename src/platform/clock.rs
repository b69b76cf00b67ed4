//! Clock collaborators

use std::cell::Cell;
use std::time::Instant;

/// Monotonic microsecond time source
pub trait Clock {
    fn now_micros(&self) -> u64;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

/// Clock that only moves when told to (tests, headless runs)
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_us: u64) -> Self {
        Self {
            now: Cell::new(start_us),
        }
    }

    pub fn advance(&self, micros: u64) {
        self.now.set(self.now.get().saturating_add(micros));
    }

    pub fn set(&self, micros: u64) {
        self.now.set(micros);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.now.get()
    }
}
