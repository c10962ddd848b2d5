//! Time handling for the station
//!
//! Every measurement is stamped with wall-clock milliseconds since the Unix
//! epoch. The sampling loop asks a [`TimeSource`] for "now" once per cycle so
//! tests can drive it with a [`FixedTime`] and a Raspberry Pi can use the
//! system clock.

use crate::constants::MS_PER_HOUR;

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Source of wall-clock time
pub trait TimeSource {
    /// Current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Whether this source follows the calendar (vs a counter from boot)
    fn is_wall_clock(&self) -> bool;
}

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// Start of the hour containing `ts`
pub fn truncate_to_hour(ts: Timestamp) -> Timestamp {
    ts - ts % MS_PER_HOUR
}

/// Whole hours elapsed since the epoch at `ts`
pub fn hours_since_epoch(ts: Timestamp) -> u64 {
    ts / MS_PER_HOUR
}
