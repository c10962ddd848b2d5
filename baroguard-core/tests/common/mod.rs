//! Common fixtures for integration tests
//!
//! - `FakeBme280`: a 256-byte register file loaded with the Bosch datasheet
//!   calibration and one conversion's raw codes, with per-register faults
//! - `ScriptedTelemetry`, `RecordingSink`, `FlakyStore`: collaborators whose
//!   failures tests can switch on and off
//! - `NoDelay`: a `DelayNs` that records instead of sleeping

#![allow(dead_code)]

use std::collections::BTreeSet;

use baroguard_core::{
    aggregation::SummaryRecord,
    constants::registers::*,
    errors::{DeviceError, DeviceResult, SinkError, StoreError, TelemetryError},
    measurement::Measurement,
    store::MemoryStore,
    time::Timestamp,
    traits::{HostTelemetry, MeasurementStore, RegisterSource, SummarySink},
    CalibrationData, StationConfig,
};
use embedded_hal::delay::DelayNs;

pub mod generators;

/// 2024-03-10T14:37:12Z
pub const START: Timestamp = 1_710_081_432_000;

pub const RAW_TEMPERATURE: i32 = 519_888;
pub const RAW_PRESSURE: i32 = 415_148;
pub const RAW_HUMIDITY: i32 = 30_000;

pub const EXPECTED_CELSIUS: f32 = 25.08;
pub const EXPECTED_PASCAL: f32 = 100_653.27;
pub const EXPECTED_HUMIDITY: f32 = 55.0007;

/// Datasheet temperature/pressure trimming plus typical humidity trimming
pub fn reference_calibration() -> CalibrationData {
    CalibrationData {
        dig_t1: 27504,
        dig_t2: 26435,
        dig_t3: -1000,
        dig_p1: 36477,
        dig_p2: -10685,
        dig_p3: 3024,
        dig_p4: 2855,
        dig_p5: 140,
        dig_p6: -7,
        dig_p7: 15500,
        dig_p8: -14600,
        dig_p9: 6000,
        dig_h1: 75,
        dig_h2: 362,
        dig_h3: 0,
        dig_h4: 313,
        dig_h5: 50,
        dig_h6: 30,
    }
}

/// In-memory BME280 register file
#[derive(Debug, Clone)]
pub struct FakeBme280 {
    pub regs: [u8; 256],
    pub broken: BTreeSet<u8>,
    pub writes: Vec<(u8, u8)>,
}

impl FakeBme280 {
    /// Reference calibration and the datasheet raw codes
    pub fn new() -> Self {
        let mut fake = Self {
            regs: [0; 256],
            broken: BTreeSet::new(),
            writes: Vec::new(),
        };
        fake.load_calibration(&reference_calibration());
        fake.load_raw(RAW_TEMPERATURE, RAW_PRESSURE, RAW_HUMIDITY);
        fake
    }

    pub fn load_calibration(&mut self, cal: &CalibrationData) {
        self.put_u16(DIG_T1, cal.dig_t1);
        self.put_u16(DIG_T2, cal.dig_t2 as u16);
        self.put_u16(DIG_T3, cal.dig_t3 as u16);
        self.put_u16(DIG_P1, cal.dig_p1);
        let p = [
            cal.dig_p2, cal.dig_p3, cal.dig_p4, cal.dig_p5, cal.dig_p6, cal.dig_p7, cal.dig_p8,
            cal.dig_p9,
        ];
        for (i, word) in p.iter().enumerate() {
            self.put_u16(DIG_P2 + 2 * i as u8, *word as u16);
        }
        self.regs[DIG_H1 as usize] = cal.dig_h1;
        self.put_u16(DIG_H2, cal.dig_h2 as u16);
        self.regs[DIG_H3 as usize] = cal.dig_h3;

        // H4 = E4[7:0] E5[3:0], H5 = E6[7:0] E5[7:4]
        let h4 = cal.dig_h4 as u16;
        let h5 = cal.dig_h5 as u16;
        self.regs[DIG_H4 as usize] = (h4 >> 4) as u8;
        self.regs[DIG_H5 as usize] = ((h5 as u8 & 0x0F) << 4) | (h4 as u8 & 0x0F);
        self.regs[DIG_H6 as usize] = (h5 >> 4) as u8;
        self.regs[DIG_H7 as usize] = cal.dig_h6 as u8;
    }

    pub fn load_raw(&mut self, temperature: i32, pressure: i32, humidity: i32) {
        self.put_raw20(TEMP_DATA, temperature);
        self.put_raw20(PRESSURE_DATA, pressure);
        self.regs[HUMIDITY_DATA as usize] = (humidity >> 8) as u8;
        self.regs[HUMIDITY_DATA as usize + 1] = humidity as u8;
    }

    pub fn break_register(&mut self, register: u8) {
        self.broken.insert(register);
    }

    pub fn heal(&mut self) {
        self.broken.clear();
    }

    fn put_u16(&mut self, register: u8, value: u16) {
        let [lsb, msb] = value.to_le_bytes();
        self.regs[register as usize] = lsb;
        self.regs[register as usize + 1] = msb;
    }

    fn put_raw20(&mut self, register: u8, value: i32) {
        let shifted = (value as u32) << 4;
        self.regs[register as usize] = (shifted >> 16) as u8;
        self.regs[register as usize + 1] = (shifted >> 8) as u8;
        self.regs[register as usize + 2] = shifted as u8;
    }
}

impl RegisterSource for FakeBme280 {
    fn read_u8(&mut self, register: u8) -> DeviceResult<u8> {
        if self.broken.contains(&register) {
            return Err(DeviceError::Read { register });
        }
        Ok(self.regs[register as usize])
    }

    fn write_u8(&mut self, register: u8, value: u8) -> DeviceResult<()> {
        if self.broken.contains(&register) {
            return Err(DeviceError::Write { register });
        }
        self.writes.push((register, value));
        Ok(())
    }
}

/// Delay that only counts
#[derive(Debug, Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

/// Host telemetry with switchable failures
#[derive(Debug, Clone)]
pub struct ScriptedTelemetry {
    pub cpu_temp: Result<f32, TelemetryError>,
    pub core_voltage: Result<f32, TelemetryError>,
}

impl Default for ScriptedTelemetry {
    fn default() -> Self {
        Self {
            cpu_temp: Ok(48.3),
            core_voltage: Ok(1.2),
        }
    }
}

impl ScriptedTelemetry {
    pub fn failing() -> Self {
        let err = TelemetryError::Unavailable { reason: "unplugged" };
        Self {
            cpu_temp: Err(err),
            core_voltage: Err(err),
        }
    }
}

impl HostTelemetry for ScriptedTelemetry {
    fn cpu_temperature(&mut self) -> Result<f32, TelemetryError> {
        self.cpu_temp
    }

    fn cpu_core_voltage(&mut self) -> Result<f32, TelemetryError> {
        self.core_voltage
    }
}

/// Keeps every published batch
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub batches: Vec<Vec<SummaryRecord>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn last(&self) -> &[SummaryRecord] {
        self.batches.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl SummarySink for RecordingSink {
    fn publish(&mut self, summaries: &[SummaryRecord]) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::PublishFailed { reason: "disk full" });
        }
        self.batches.push(summaries.to_vec());
        Ok(())
    }
}

/// `MemoryStore` that can be told to reject writes
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub reject: bool,
}

impl MeasurementStore for FlakyStore {
    fn create(&mut self, measurement: Measurement) -> Result<(), StoreError> {
        if self.reject {
            return Err(StoreError::Rejected { reason: "read-only" });
        }
        self.inner.create(measurement)
    }

    fn list(&self, start: Timestamp, end: Timestamp) -> Vec<Measurement> {
        self.inner.list(start, end)
    }
}

pub type TestStation =
    baroguard_core::Station<FakeBme280, NoDelay, ScriptedTelemetry, FlakyStore, RecordingSink>;

pub fn station_with(registers: FakeBme280, telemetry: ScriptedTelemetry) -> TestStation {
    baroguard_core::Station::new(
        registers,
        NoDelay::default(),
        telemetry,
        FlakyStore::default(),
        RecordingSink::default(),
        StationConfig::default(),
    )
}

pub fn station() -> TestStation {
    station_with(FakeBme280::new(), ScriptedTelemetry::default())
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
