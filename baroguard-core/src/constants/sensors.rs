//! Compensation Constants and Output Limits
//!
//! Divisors of the floating point compensation polynomials and the limits
//! applied to their output.
//!
//! Source: Bosch BME280 datasheet, section 8.1 (floating point compensation)

/// Lowest relative humidity reported (%RH).
pub const HUMIDITY_MIN_PCT: f32 = 0.0;

/// Highest relative humidity reported (%RH).
pub const HUMIDITY_MAX_PCT: f32 = 100.0;

/// Divisor turning fine temperature into degrees Celsius.
pub const FINE_TEMPERATURE_PER_DEGREE: f32 = 5120.0;

/// Fine temperature offset used by the humidity polynomial.
pub const HUMIDITY_FINE_OFFSET: f32 = 76800.0;

/// Fine temperature offset used by the pressure polynomial.
pub const PRESSURE_FINE_OFFSET: f32 = 64000.0;

/// Full scale of the 20-bit pressure ADC.
pub const PRESSURE_ADC_FULL_SCALE: f32 = 1_048_576.0;

// ===== CONVERSION TIMING =====

/// Fixed start-up part of a forced conversion (µs).
pub const CONVERSION_BASE_US: u32 = 1_250;

/// Time per oversampling step and channel (µs).
pub const CONVERSION_STEP_US: u32 = 2_300;

/// Extra settling for the pressure and humidity channels (µs each).
pub const CONVERSION_CHANNEL_SETTLE_US: u32 = 575;
