//! Measurement history generators

use baroguard_core::{constants::MS_PER_HOUR, measurement::Measurement, time::Timestamp};

/// Diurnal temperature curve: coolest at 04:00, warmest at 16:00
pub fn diurnal_temperature(ts: Timestamp, mean: f32, swing: f32) -> f32 {
    let hour = (ts / MS_PER_HOUR % 24) as f32;
    let angle = 2.0 * std::f32::consts::PI * (hour - 10.0) / 24.0;
    mean + swing * angle.sin()
}

/// One reading every `interval_ms` over `[start, end)`
pub fn history(start: Timestamp, end: Timestamp, interval_ms: u64) -> Vec<Measurement> {
    (start..end)
        .step_by(interval_ms as usize)
        .map(|ts| Measurement {
            timestamp: ts,
            temperature: diurnal_temperature(ts, 12.0, 6.0),
            pressure: 101_000.0,
            humidity: 60.0,
            cpu_temp: 45.0,
            cpu_core_voltage: 1.2,
        })
        .collect()
}
