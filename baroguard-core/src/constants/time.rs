//! Time-Related Constants
//!
//! Time unit conversions, the sampling interval, and the spans of the
//! standard report windows.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u64 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u64 = 24;

/// Days per week.
pub const DAYS_PER_WEEK: u64 = 7;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u64 = MS_PER_SECOND * SECONDS_PER_MINUTE;

/// Milliseconds per hour.
pub const MS_PER_HOUR: u64 = MS_PER_MINUTE * MINUTES_PER_HOUR;

/// Milliseconds per day.
pub const MS_PER_DAY: u64 = MS_PER_HOUR * HOURS_PER_DAY;

/// Milliseconds per week.
pub const MS_PER_WEEK: u64 = MS_PER_DAY * DAYS_PER_WEEK;

// ===== SAMPLING =====

/// Default pause between two sampling cycles (milliseconds).
///
/// One reading per minute is plenty for room and weather monitoring and
/// keeps self-heating of the sensor negligible.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 60_000;
