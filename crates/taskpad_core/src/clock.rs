//! Time source capability.
//!
//! # Responsibility
//! - Abstract "now" so task creation timestamps are deterministic under test.
//!
//! # Invariants
//! - Implementations report unix epoch milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// Capability supplying creation timestamps.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

/// Wall-clock time source used by production stores.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        // A pre-epoch system clock maps to 0 rather than failing task creation.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as i64)
    }
}

/// Fixed time source for deterministic tests and fixtures.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0
    }
}
