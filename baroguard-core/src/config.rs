//! Station configuration
//!
//! Every knob has a default matching a BME280 breakout at address `0x77` on a
//! Raspberry Pi, sampled once a minute. Adjust with the `with_*` builders:
//!
//! ```rust
//! use baroguard_core::config::StationConfig;
//! use baroguard_core::device::Oversampling;
//! use baroguard_core::measurement::Quantity;
//!
//! let config = StationConfig::default()
//!     .with_oversampling(Oversampling::X16)
//!     .with_sample_interval_ms(30_000)
//!     .with_reported_quantity(Quantity::Pressure);
//!
//! assert_eq!(config.i2c_address, 0x77);
//! assert_eq!(config.sample_interval_ms, 30_000);
//! ```
//!
//! With the `serde` feature the whole structure deserializes from JSON;
//! missing fields take their defaults.

use alloc::vec::Vec;

use crate::aggregation::{default_windows, ReportWindow, TimeBucketedAggregator};
use crate::constants::{BME280_I2C_ADDRESS, DEFAULT_SAMPLE_INTERVAL_MS, SEA_LEVEL_PRESSURE_PA};
use crate::device::Oversampling;
use crate::measurement::Quantity;

/// Sampling loop settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StationConfig {
    /// 7-bit I2C address of the sensor
    pub i2c_address: u8,
    /// Oversampling for all three channels
    pub oversampling: Oversampling,
    /// Pause between cycles
    pub sample_interval_ms: u64,
    /// Reference pressure for altitude, Pa
    pub sea_level_pressure_pa: f64,
    /// Trailing windows published after each cycle
    pub report_windows: Vec<ReportWindow>,
    /// Field summarised in the published windows
    pub reported_quantity: Quantity,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            i2c_address: BME280_I2C_ADDRESS,
            oversampling: Oversampling::default(),
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            sea_level_pressure_pa: SEA_LEVEL_PRESSURE_PA,
            report_windows: default_windows(),
            reported_quantity: Quantity::Temperature,
        }
    }
}

impl StationConfig {
    pub fn with_i2c_address(mut self, address: u8) -> Self {
        self.i2c_address = address;
        self
    }

    pub fn with_oversampling(mut self, oversampling: Oversampling) -> Self {
        self.oversampling = oversampling;
        self
    }

    pub fn with_sample_interval_ms(mut self, interval_ms: u64) -> Self {
        self.sample_interval_ms = interval_ms;
        self
    }

    /// Non-positive or non-finite references are ignored
    pub fn with_sea_level_pressure(mut self, pressure_pa: f64) -> Self {
        if pressure_pa.is_finite() && pressure_pa > 0.0 {
            self.sea_level_pressure_pa = pressure_pa;
        }
        self
    }

    pub fn with_report_windows(mut self, windows: Vec<ReportWindow>) -> Self {
        self.report_windows = windows;
        self
    }

    pub fn with_reported_quantity(mut self, quantity: Quantity) -> Self {
        self.reported_quantity = quantity;
        self
    }

    /// Aggregator for the configured windows and quantity
    pub fn aggregator(&self) -> TimeBucketedAggregator {
        TimeBucketedAggregator::new(self.report_windows.clone(), self.reported_quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MS_PER_WEEK;

    #[test]
    fn defaults() {
        let config = StationConfig::default();
        assert_eq!(config.i2c_address, 0x77);
        assert_eq!(config.oversampling, Oversampling::X8);
        assert_eq!(config.sample_interval_ms, 60_000);
        assert_eq!(config.sea_level_pressure_pa, 101_325.0);
        assert_eq!(config.report_windows.len(), 3);
        assert_eq!(config.aggregator().longest_span_ms(), MS_PER_WEEK);
    }

    #[test]
    fn bad_sea_level_is_ignored() {
        let config = StationConfig::default()
            .with_sea_level_pressure(-1.0)
            .with_sea_level_pressure(f64::NAN);
        assert_eq!(config.sea_level_pressure_pa, 101_325.0);

        let config = config.with_sea_level_pressure(102_000.0);
        assert_eq!(config.sea_level_pressure_pa, 102_000.0);
    }

    #[test]
    fn builders_chain() {
        let config = StationConfig::default()
            .with_i2c_address(0x76)
            .with_report_windows(alloc::vec![ReportWindow::hourly()])
            .with_reported_quantity(Quantity::Humidity);

        let agg = config.aggregator();
        assert_eq!(config.i2c_address, 0x76);
        assert_eq!(agg.windows().len(), 1);
        assert_eq!(agg.quantity(), Quantity::Humidity);
    }
}
