//! Core engine for BaroGuard weather stations
//!
//! Reads a Bosch BME280 temperature/pressure/humidity sensor, turns its raw
//! ADC codes into physical units with the factory calibration, and keeps
//! hi/low/average summaries of the history.
//!
//! Designed for small Linux boards and microcontrollers alike:
//! - `no_std` + `alloc` without the `std` feature
//! - register access behind a trait, with an `embedded-hal` I2C adapter
//! - single-threaded, no interior mutability
//!
//! ```no_run
//! use baroguard_core::{Compensator, CalibrationData};
//!
//! # let calibration = CalibrationData::default();
//! let compensator = Compensator::new(calibration);
//!
//! // Temperature first: its fine temperature feeds the other two
//! let (celsius, fine) = compensator.compensate_temperature(519_888);
//! let pascal = compensator.compensate_pressure(415_148, fine);
//! let humidity = compensator.compensate_humidity(30_000, fine);
//! # let _ = (celsius, pascal, humidity);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod aggregation;
pub mod calibration;
pub mod compensation;
pub mod config;
pub mod constants;
pub mod device;
pub mod errors;
pub mod measurement;
pub mod sampling;
pub mod store;
pub mod telemetry;
pub mod time;
pub mod traits;

// Public API
pub use aggregation::{
    Bucket, HourKey, HourSlot, HourlyBuckets, ReportWindow, SummaryRecord, TimeBucketedAggregator,
};
pub use calibration::CalibrationData;
pub use compensation::{compute_altitude, CompensatedSample, Compensator, FineTemperature, RawSample};
pub use config::StationConfig;
pub use device::{Bme280, I2cRegisters, Oversampling};
pub use errors::{DeviceError, DeviceResult, SinkError, StoreError, TelemetryError};
pub use measurement::{Measurement, Quantity};
pub use sampling::{CycleReport, ReadFailure, Station};
pub use store::MemoryStore;
pub use telemetry::NoTelemetry;
pub use time::{FixedTime, TimeSource, Timestamp};
pub use traits::{HostTelemetry, MeasurementStore, RegisterSource, SummarySink};

#[cfg(feature = "std")]
pub use sampling::StdDelay;
#[cfg(feature = "std")]
pub use telemetry::SysfsTelemetry;
#[cfg(feature = "std")]
pub use time::SystemTime;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
