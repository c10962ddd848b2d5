//! Floating Point Compensation of Raw ADC Codes
//!
//! ## Overview
//!
//! The BME280 reports uncompensated ADC codes. Turning them into °C, Pa and
//! %RH takes the vendor's polynomials, the device's [`CalibrationData`] and
//! one intermediate value: the *fine temperature*.
//!
//! ## Fine Temperature
//!
//! Pressure and humidity both depend on the temperature of the die at the
//! moment of conversion. Temperature compensation therefore produces a
//! [`FineTemperature`] token next to the Celsius value, and the pressure and
//! humidity functions take that token as an argument:
//!
//! ```text
//! raw T ──► compensate_temperature ──► °C
//!                    │
//!                    └──► FineTemperature ──┬──► compensate_pressure(raw P) ──► Pa
//!                                           └──► compensate_humidity(raw H) ──► %RH
//! ```
//!
//! The token is the integer-truncated (toward zero) value of `var1 + var2`,
//! stored as `f32`. The truncation is part of the reference algorithm and is
//! kept on purpose.
//!
//! ## Ordering
//!
//! A token must come from the same conversion cycle as the pressure and
//! humidity codes it is used with. `FineTemperature::default()` is the zero
//! value a freshly constructed engine would hold; using it gives a finite,
//! deterministic and physically meaningless result rather than a panic.
//!
//! ## Usage Example
//!
//! ```rust
//! use baroguard_core::calibration::CalibrationData;
//! use baroguard_core::compensation::Compensator;
//!
//! let calibration = CalibrationData {
//!     dig_t1: 27504, dig_t2: 26435, dig_t3: -1000,
//!     dig_p1: 36477, dig_p2: -10685, dig_p3: 3024, dig_p4: 2855, dig_p5: 140,
//!     dig_p6: -7, dig_p7: 15500, dig_p8: -14600, dig_p9: 6000,
//!     ..CalibrationData::default()
//! };
//! let compensator = Compensator::new(calibration);
//!
//! let (celsius, fine) = compensator.compensate_temperature(519888);
//! let pascal = compensator.compensate_pressure(415148, fine);
//!
//! assert!((celsius - 25.08).abs() < 0.01);
//! assert!((pascal - 100653.27).abs() < 1.0);
//! ```

use crate::calibration::CalibrationData;
use crate::constants::physics::{ALTITUDE_EXPONENT, ALTITUDE_SCALE_M};
use crate::constants::sensors::{
    FINE_TEMPERATURE_PER_DEGREE, HUMIDITY_FINE_OFFSET, HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT,
    PRESSURE_ADC_FULL_SCALE, PRESSURE_FINE_OFFSET,
};

/// Raw ADC codes of one conversion cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    /// 20-bit temperature code
    pub temperature: i32,
    /// 20-bit pressure code
    pub pressure: i32,
    /// 16-bit humidity code
    pub humidity: i32,
}

/// Fine temperature produced by [`Compensator::compensate_temperature`]
///
/// Opaque on purpose: the only way to get a meaningful one is to compensate
/// a fresh temperature code.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FineTemperature(f32);

impl FineTemperature {
    /// Raw fine temperature value (for logging and diagnostics)
    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Physical values of one conversion cycle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompensatedSample {
    /// Temperature in °C
    pub temperature: f32,
    /// Pressure in Pa
    pub pressure: f32,
    /// Relative humidity in %
    pub humidity: f32,
}

/// Converts raw ADC codes into physical units
///
/// Holds the decoded calibration for the lifetime of the device session and
/// nothing else; all per-cycle state travels in [`FineTemperature`].
#[derive(Debug, Clone, Copy)]
pub struct Compensator {
    calibration: CalibrationData,
}

impl Compensator {
    /// Build a compensator around decoded calibration constants
    pub fn new(calibration: CalibrationData) -> Self {
        Self { calibration }
    }

    /// Calibration constants in use
    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration
    }

    /// Compensate a raw temperature code
    ///
    /// Returns degrees Celsius and the fine temperature required by
    /// [`compensate_pressure`](Self::compensate_pressure) and
    /// [`compensate_humidity`](Self::compensate_humidity).
    pub fn compensate_temperature(&self, raw_temperature: i32) -> (f32, FineTemperature) {
        let cal = &self.calibration;
        let adc = raw_temperature as f32;
        let t1 = cal.dig_t1 as f32;

        let var1 = (adc / 16384.0 - t1 / 1024.0) * cal.dig_t2 as f32;
        let delta = adc / 131072.0 - t1 / 8192.0;
        let var2 = (delta * delta) * cal.dig_t3 as f32;

        let sum = var1 + var2;
        // Truncate toward zero like the reference implementation
        let fine = FineTemperature(sum as i32 as f32);

        (sum / FINE_TEMPERATURE_PER_DEGREE, fine)
    }

    /// Compensate a raw pressure code, result in pascal
    ///
    /// Returns exactly `0.0` when the calibration makes the divisor vanish
    /// (`var1 == 0`), whatever the ADC code.
    pub fn compensate_pressure(&self, raw_pressure: i32, fine: FineTemperature) -> f32 {
        let cal = &self.calibration;

        let mut var1 = fine.0 / 2.0 - PRESSURE_FINE_OFFSET;
        let mut var2 = var1 * var1 * (cal.dig_p6 as f32 / 32768.0);
        var2 += var1 * cal.dig_p5 as f32 * 2.0;
        var2 = var2 / 4.0 + cal.dig_p4 as f32 * 65536.0;
        var1 = (cal.dig_p3 as f32 * var1 * var1 / 524288.0 + cal.dig_p2 as f32 * var1) / 524288.0;
        var1 = (1.0 + var1 / 32768.0) * cal.dig_p1 as f32;

        if var1 == 0.0 {
            // Degenerate calibration, avoid dividing by zero
            return 0.0;
        }

        let mut pressure = PRESSURE_ADC_FULL_SCALE - raw_pressure as f32;
        pressure = ((pressure - var2 / 4096.0) * 6250.0) / var1;
        var1 = cal.dig_p9 as f32 * pressure * pressure / 2147483648.0;
        var2 = pressure * cal.dig_p8 as f32 / 32768.0;

        pressure + (var1 + var2 + cal.dig_p7 as f32) / 16.0
    }

    /// Compensate a raw humidity code, result in %RH clamped to `[0, 100]`
    ///
    /// `dig_H5` is scaled by the datasheet divisor `16384.0`. Older firmware
    /// used `16384.8`, which moves results by less than 0.0001 %RH.
    pub fn compensate_humidity(&self, raw_humidity: i32, fine: FineTemperature) -> f32 {
        let cal = &self.calibration;

        let mut humidity = fine.0 - HUMIDITY_FINE_OFFSET;
        let offset = cal.dig_h4 as f32 * 64.0 + cal.dig_h5 as f32 / 16384.0 * humidity;
        let gain = cal.dig_h2 as f32 / 65536.0
            * (1.0
                + cal.dig_h6 as f32 / 67108864.0
                    * humidity
                    * (1.0 + cal.dig_h3 as f32 / 67108864.0 * humidity));
        humidity = (raw_humidity as f32 - offset) * gain;
        humidity *= 1.0 - cal.dig_h1 as f32 * humidity / 524288.0;

        clamp_humidity(humidity)
    }

    /// Compensate a full cycle in the mandated order
    pub fn compensate(&self, raw: RawSample) -> CompensatedSample {
        let (temperature, fine) = self.compensate_temperature(raw.temperature);

        CompensatedSample {
            temperature,
            pressure: self.compensate_pressure(raw.pressure, fine),
            humidity: self.compensate_humidity(raw.humidity, fine),
        }
    }
}

/// Clip a humidity value into the reportable range; NaN maps to the floor
fn clamp_humidity(humidity: f32) -> f32 {
    if humidity.is_nan() {
        HUMIDITY_MIN_PCT
    } else if humidity > HUMIDITY_MAX_PCT {
        HUMIDITY_MAX_PCT
    } else if humidity < HUMIDITY_MIN_PCT {
        HUMIDITY_MIN_PCT
    } else {
        humidity
    }
}

/// Altitude in metres for a pressure and a sea-level reference (same unit)
///
/// `44330 × (1 − (pressure / sea_level_reference)^0.1903)`
///
/// We use `libm::pow` so the conversion also works without `std`.
pub fn compute_altitude(pressure: f64, sea_level_reference: f64) -> f64 {
    ALTITUDE_SCALE_M * (1.0 - libm::pow(pressure / sea_level_reference, ALTITUDE_EXPONENT))
}
