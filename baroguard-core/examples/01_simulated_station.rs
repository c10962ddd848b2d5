//! Simulated Station Example
//!
//! Runs a day of sampling cycles against an in-memory BME280 register file
//! and prints the published summaries and the hour-of-day temperatures.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_simulated_station
//! ```

use baroguard_core::{
    constants::{registers::*, MS_PER_HOUR},
    errors::{DeviceResult, SinkError},
    FixedTime, MemoryStore, NoTelemetry, Quantity, RegisterSource, Station, StationConfig,
    SummaryRecord, SummarySink, TimeSource,
};
use embedded_hal::delay::DelayNs;

/// Register file with datasheet calibration; the temperature code drifts
/// every time a conversion is started
struct SimulatedBme280 {
    regs: [u8; 256],
    conversions: u32,
}

impl SimulatedBme280 {
    fn new() -> Self {
        let mut regs = [0u8; 256];
        let words: [(u8, u16); 12] = [
            (DIG_T1, 27504),
            (DIG_T2, 26435),
            (DIG_T3, -1000i16 as u16),
            (DIG_P1, 36477),
            (DIG_P2, -10685i16 as u16),
            (DIG_P3, 3024),
            (DIG_P4, 2855),
            (DIG_P5, 140),
            (DIG_P6, -7i16 as u16),
            (DIG_P7, 15500),
            (DIG_P8, -14600i16 as u16),
            (DIG_P9, 6000),
        ];
        for (register, word) in words {
            regs[register as usize..register as usize + 2].copy_from_slice(&word.to_le_bytes());
        }
        regs[DIG_H1 as usize] = 75;
        regs[DIG_H2 as usize..DIG_H2 as usize + 2].copy_from_slice(&362u16.to_le_bytes());
        regs[DIG_H4 as usize..=DIG_H7 as usize].copy_from_slice(&[0x13, 0x29, 0x03, 30]);
        regs[PRESSURE_DATA as usize..PRESSURE_DATA as usize + 3].copy_from_slice(&[0x65, 0x5A, 0xC0]);
        regs[HUMIDITY_DATA as usize..HUMIDITY_DATA as usize + 2].copy_from_slice(&[0x75, 0x30]);
        Self { regs, conversions: 0 }
    }
}

impl RegisterSource for SimulatedBme280 {
    fn read_u8(&mut self, register: u8) -> DeviceResult<u8> {
        Ok(self.regs[register as usize])
    }

    fn write_u8(&mut self, register: u8, value: u8) -> DeviceResult<()> {
        if register == CONTROL && value & MODE_FORCED != 0 {
            // A slow sawtooth around 25 °C
            let raw = 519_888u32 + (self.conversions % 24) * 400;
            let shifted = raw << 4;
            let t = TEMP_DATA as usize;
            self.regs[t..t + 3].copy_from_slice(&shifted.to_be_bytes()[1..]);
            self.conversions += 1;
        }
        self.regs[register as usize] = value;
        Ok(())
    }
}

struct Instant;

impl DelayNs for Instant {
    fn delay_ns(&mut self, _ns: u32) {}
}

struct PrintSink;

impl SummarySink for PrintSink {
    fn publish(&mut self, summaries: &[SummaryRecord]) -> Result<(), SinkError> {
        for s in summaries {
            println!(
                "  {:<7} hi {:>6.2}  low {:>6.2}  avg {:>6.2}  n={}",
                s.title, s.hi, s.low, s.avg, s.count
            );
        }
        Ok(())
    }
}

fn main() {
    println!("BaroGuard Simulated Station");
    println!("===========================\n");

    let mut station = Station::new(
        SimulatedBme280::new(),
        Instant,
        NoTelemetry,
        MemoryStore::with_retention(7 * 24 * MS_PER_HOUR),
        PrintSink,
        StationConfig::default(),
    );

    // 2024-03-10T00:00:00Z, one cycle per hour
    let mut clock = FixedTime::new(1_710_028_800_000);
    for _ in 0..24 {
        let report = station.run_cycle(clock.now());
        if report.failed(Quantity::Temperature) {
            let err = report.failure(Quantity::Temperature);
            println!("temperature failed: {:?}", err);
        }
        clock.advance(MS_PER_HOUR);
    }

    println!("\nHour-of-day temperatures:");
    for slot in station.hourly_averages(clock.now() - 1).iter() {
        let t = slot.bucket(Quantity::Temperature);
        if t.has_samples() {
            println!("  {}  {:.2} °C", slot.key(), t.avg);
        }
    }
}
