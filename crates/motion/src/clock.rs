//! Frame time sources.
//!
//! Animations never read wall time themselves; the embedder feeds a
//! timestamp into every tick. These clocks are the two stock sources:
//! [`SystemClock`] for real embedders, [`ManualClock`] for deterministic
//! tests.

use std::cell::Cell;
use std::time::Instant;

/// A source of frame timestamps, in milliseconds from an arbitrary epoch.
pub trait FrameClock {
    fn now(&self) -> f64;
}

/// Hand-advanced clock for tests. Starts at zero.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Monotonic wall clock, milliseconds since construction.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}
