//! Atmospheric Reference Values
//!
//! Used by the hypsometric altitude conversion.

/// Standard atmospheric pressure at sea level (Pa).
///
/// Source: International Standard Atmosphere (ISA)
pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;

/// Scale of the barometric altitude formula (m).
///
/// `h = 44330 × (1 − (p/p₀)^0.1903)`
pub const ALTITUDE_SCALE_M: f64 = 44_330.0;

/// Exponent of the barometric altitude formula.
pub const ALTITUDE_EXPONENT: f64 = 0.1903;
