//! Constants for BaroGuard Core
//!
//! Centralised numeric values used by the decoder, the compensator and the
//! aggregator. Every value carries its unit in the name and its source in the
//! documentation.
//!
//! ## Organization
//!
//! - **Registers**: BME280 register map (wire contract, must match the device)
//! - **Sensors**: compensation polynomial divisors and output limits
//! - **Physics**: atmospheric references for altitude conversion
//! - **Time**: unit conversions, sampling interval and report windows

/// BME280 register addresses and bit layouts.
pub mod registers;

/// Compensation constants and sensor output limits.
pub mod sensors;

/// Atmospheric reference values.
pub mod physics;

/// Time-related constants for intervals and report windows.
pub mod time;

// Re-export commonly used constants for convenience
pub use registers::{BME280_I2C_ADDRESS, CALIBRATION_BYTE_COUNT};

pub use sensors::{HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT};

pub use physics::{SEA_LEVEL_PRESSURE_PA, ALTITUDE_SCALE_M, ALTITUDE_EXPONENT};

pub use time::{
    MS_PER_SECOND, MS_PER_MINUTE, MS_PER_HOUR, MS_PER_DAY, MS_PER_WEEK,
    DEFAULT_SAMPLE_INTERVAL_MS, HOURS_PER_DAY,
};
