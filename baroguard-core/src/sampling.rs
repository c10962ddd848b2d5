//! Sampling Loop
//!
//! ## Overview
//!
//! [`Station`] owns the sensor and every collaborator and runs one cycle per
//! sample interval:
//!
//! ```text
//!   ┌─ calibrate (until it succeeds)
//!   ├─ trigger forced conversion, wait conversion time
//!   ├─ temperature ─→ FineTemperature ─┬─→ pressure
//!   │                                  └─→ humidity
//!   ├─ CPU temperature, core voltage
//!   ├─ MeasurementStore::create
//!   ├─ summarize trailing windows ─→ SummarySink::publish
//!   └─ sleep sample interval
//! ```
//!
//! ## Fault Isolation
//!
//! No failure stops the loop. Each quantity is read on its own; a failed read
//! is logged and leaves that field at `0.0`. The [`CycleReport`] returned by
//! [`Station::run_cycle`] says what failed.
//!
//! ## Fine Temperature
//!
//! Pressure and humidity need the fine temperature of the *same* conversion.
//! When the temperature read fails, the station falls back to the last fine
//! temperature it produced (or the zero token before the first success) and
//! logs a warning; the resulting pressure and humidity are plausible but not
//! exact.

use embedded_hal::delay::DelayNs;

use crate::aggregation::{HourlyBuckets, TimeBucketedAggregator};
use crate::compensation::{compute_altitude, Compensator, FineTemperature};
use crate::config::StationConfig;
use crate::constants::{HOURS_PER_DAY, MS_PER_HOUR};
use crate::device::Bme280;
use crate::errors::{DeviceError, TelemetryError};
use crate::measurement::{Measurement, Quantity};
use crate::time::{truncate_to_hour, TimeSource, Timestamp};
use crate::traits::{HostTelemetry, MeasurementStore, RegisterSource, SummarySink};

/// Why one quantity is missing from a cycle's measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailure {
    Device(DeviceError),
    Telemetry(TelemetryError),
}

impl From<DeviceError> for ReadFailure {
    fn from(err: DeviceError) -> Self {
        ReadFailure::Device(err)
    }
}

impl From<TelemetryError> for ReadFailure {
    fn from(err: TelemetryError) -> Self {
        ReadFailure::Telemetry(err)
    }
}

/// Outcome of one sampling cycle
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// What was handed to the store
    pub measurement: Measurement,
    /// Quantities left at `0.0`, in read order
    pub failures: heapless::Vec<(Quantity, ReadFailure), 5>,
    /// Pressure/humidity used a fine temperature from an earlier cycle
    pub stale_fine_temperature: bool,
    pub stored: bool,
    pub published: bool,
}

impl CycleReport {
    pub fn failure(&self, quantity: Quantity) -> Option<ReadFailure> {
        self.failures
            .iter()
            .find(|(q, _)| *q == quantity)
            .map(|(_, err)| *err)
    }

    pub fn failed(&self, quantity: Quantity) -> bool {
        self.failure(quantity).is_some()
    }

    /// Every quantity read and every hand-off succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.stale_fine_temperature && self.stored && self.published
    }

    fn fail(&mut self, quantity: Quantity, failure: impl Into<ReadFailure>) {
        // One slot per quantity, each is recorded at most once
        let _ = self.failures.push((quantity, failure.into()));
    }
}

/// A weather station: one BME280 plus host telemetry, history and a
/// summary sink
pub struct Station<R, D, H, S, K> {
    sensor: Bme280<R>,
    delay: D,
    telemetry: H,
    store: S,
    sink: K,
    config: StationConfig,
    aggregator: TimeBucketedAggregator,
    compensator: Option<Compensator>,
    last_fine: Option<FineTemperature>,
}

impl<R, D, H, S, K> Station<R, D, H, S, K>
where
    R: RegisterSource,
    D: DelayNs,
    H: HostTelemetry,
    S: MeasurementStore,
    K: SummarySink,
{
    /// Assemble a station; the sensor is not touched until the first cycle
    pub fn new(registers: R, delay: D, telemetry: H, store: S, sink: K, config: StationConfig) -> Self {
        Self {
            sensor: Bme280::new(registers, config.oversampling),
            delay,
            telemetry,
            store,
            sink,
            aggregator: config.aggregator(),
            config,
            compensator: None,
            last_fine: None,
        }
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn compensator(&self) -> Option<&Compensator> {
        self.compensator.as_ref()
    }

    pub fn is_calibrated(&self) -> bool {
        self.compensator.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    pub fn registers_mut(&mut self) -> &mut R {
        self.sensor.source_mut()
    }

    pub fn telemetry_mut(&mut self) -> &mut H {
        &mut self.telemetry
    }

    /// Write the start-up control value and decode calibration
    ///
    /// Called by every cycle until it succeeds.
    pub fn initialize(&mut self) -> Result<(), DeviceError> {
        self.sensor.configure()?;
        let calibration = self.sensor.read_calibration()?;
        log_info!(
            "BME280 calibrated (T1={}, P1={}, H1={})",
            calibration.dig_t1,
            calibration.dig_p1,
            calibration.dig_h1
        );
        self.compensator = Some(Compensator::new(calibration));
        Ok(())
    }

    /// Sample once at `now`, store the result and publish fresh summaries
    pub fn run_cycle(&mut self, now: Timestamp) -> CycleReport {
        if self.compensator.is_none() {
            if let Err(_err) = self.initialize() {
                log_error!("Failed to read calibration: {}", _err);
            }
        }

        let mut report = CycleReport {
            measurement: Measurement::at(now),
            failures: heapless::Vec::new(),
            stale_fine_temperature: false,
            stored: false,
            published: false,
        };

        self.sample_sensor(&mut report);
        self.sample_telemetry(&mut report);

        let m = report.measurement;
        for q in Quantity::ALL {
            if !report.failed(q) {
                log_debug!("{} {:.2} {}", q.name(), m.value(q), q.unit());
            }
        }
        if !report.failed(Quantity::Pressure) {
            let _altitude = compute_altitude(m.pressure as f64, self.config.sea_level_pressure_pa);
            log_debug!("Altitude {:.1} m", _altitude);
        }

        match self.store.create(m) {
            Ok(()) => report.stored = true,
            Err(_err) => log_error!("Failed to write measurement: {}", _err),
        }

        // Summaries include the sample just taken
        let report_time = now.saturating_add(1);
        let history = self.store.list(
            report_time.saturating_sub(self.aggregator.longest_span_ms()),
            report_time,
        );
        let records = self.aggregator.records(&history, report_time);
        match self.sink.publish(&records) {
            Ok(()) => report.published = true,
            Err(_err) => log_error!("Failed to publish summaries: {}", _err),
        }

        report
    }

    /// Hour-of-day averages over the 24 hours ending with the one containing
    /// `now`, from stored history
    pub fn hourly_averages(&self, now: Timestamp) -> HourlyBuckets {
        let start = truncate_to_hour(now).saturating_sub((HOURS_PER_DAY - 1) * MS_PER_HOUR);
        let end = truncate_to_hour(now).saturating_add(MS_PER_HOUR);
        HourlyBuckets::last_24_hours(&self.store.list(start, end), now)
    }

    /// Sample forever, sleeping the configured interval between cycles
    pub fn run<C: TimeSource>(&mut self, clock: &C) -> ! {
        log_info!(
            "Sampling every {} ms with {:?} oversampling",
            self.config.sample_interval_ms,
            self.sensor.oversampling()
        );
        loop {
            let _report = self.run_cycle(clock.now());
            self.pause();
        }
    }

    /// Sleep one sample interval; `DelayNs` takes at most `u32::MAX` ms per call
    fn pause(&mut self) {
        let mut remaining = self.config.sample_interval_ms;
        while remaining > 0 {
            let chunk = u32::try_from(remaining).unwrap_or(u32::MAX);
            self.delay.delay_ms(chunk);
            remaining -= u64::from(chunk);
        }
    }

    fn sample_sensor(&mut self, report: &mut CycleReport) {
        let compensator = match self.compensator {
            Some(c) => c,
            None => {
                for q in [Quantity::Temperature, Quantity::Pressure, Quantity::Humidity] {
                    report.fail(q, DeviceError::CalibrationIncomplete);
                }
                return;
            }
        };

        if let Err(err) = self.sensor.trigger_measurement(&mut self.delay) {
            log_error!("Failed to start conversion: {}", err);
            for q in [Quantity::Temperature, Quantity::Pressure, Quantity::Humidity] {
                report.fail(q, err);
            }
            return;
        }

        let fine = match self.sensor.read_raw_temperature() {
            Ok(raw) => {
                let (celsius, fine) = compensator.compensate_temperature(raw);
                report.measurement.temperature = celsius;
                self.last_fine = Some(fine);
                fine
            }
            Err(err) => {
                log_error!("Failed to read temperature: {}", err);
                report.fail(Quantity::Temperature, err);
                report.stale_fine_temperature = true;
                log_warn!("Compensating pressure and humidity with a stale fine temperature");
                self.last_fine.unwrap_or_default()
            }
        };

        match self.sensor.read_raw_pressure() {
            Ok(raw) => report.measurement.pressure = compensator.compensate_pressure(raw, fine),
            Err(err) => {
                log_error!("Failed to read pressure: {}", err);
                report.fail(Quantity::Pressure, err);
            }
        }

        match self.sensor.read_raw_humidity() {
            Ok(raw) => report.measurement.humidity = compensator.compensate_humidity(raw, fine),
            Err(err) => {
                log_error!("Failed to read humidity: {}", err);
                report.fail(Quantity::Humidity, err);
            }
        }
    }

    fn sample_telemetry(&mut self, report: &mut CycleReport) {
        match self.telemetry.cpu_temperature() {
            Ok(celsius) => report.measurement.cpu_temp = celsius,
            Err(err) => {
                log_error!("Failed to read CPU temperature: {}", err);
                report.fail(Quantity::CpuTemperature, err);
            }
        }

        match self.telemetry.cpu_core_voltage() {
            Ok(volts) => report.measurement.cpu_core_voltage = volts,
            Err(err) => {
                log_error!("Failed to read CPU core voltage: {}", err);
                report.fail(Quantity::CpuCoreVoltage, err);
            }
        }
    }
}

/// [`DelayNs`] backed by `std::thread::sleep`
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(core::time::Duration::from_nanos(ns as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(core::time::Duration::from_millis(ms as u64));
    }
}
