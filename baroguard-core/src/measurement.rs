//! Measurement records
//!
//! A [`Measurement`] is one row of station history: the compensated sensor
//! values plus host CPU telemetry taken in the same cycle. Any quantity whose
//! read failed is stored as `0.0`.

use crate::time::Timestamp;

/// One sampling cycle's worth of readings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    /// Milliseconds since the Unix epoch
    pub timestamp: Timestamp,
    /// °C
    pub temperature: f32,
    /// Pa
    pub pressure: f32,
    /// %RH
    pub humidity: f32,
    /// Host CPU temperature, °C
    pub cpu_temp: f32,
    /// Host CPU core voltage, V
    pub cpu_core_voltage: f32,
}

impl Measurement {
    /// Empty measurement at `timestamp`
    pub fn at(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// Value of one field
    pub fn value(&self, quantity: Quantity) -> f32 {
        match quantity {
            Quantity::Temperature => self.temperature,
            Quantity::Pressure => self.pressure,
            Quantity::Humidity => self.humidity,
            Quantity::CpuTemperature => self.cpu_temp,
            Quantity::CpuCoreVoltage => self.cpu_core_voltage,
        }
    }
}

/// Names one of the measured fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Quantity {
    #[default]
    Temperature,
    Pressure,
    Humidity,
    CpuTemperature,
    CpuCoreVoltage,
}

impl Quantity {
    /// Every quantity, in record order
    pub const ALL: [Quantity; 5] = [
        Quantity::Temperature,
        Quantity::Pressure,
        Quantity::Humidity,
        Quantity::CpuTemperature,
        Quantity::CpuCoreVoltage,
    ];

    /// Position in [`Quantity::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Pressure => "pressure",
            Quantity::Humidity => "humidity",
            Quantity::CpuTemperature => "cpu_temp",
            Quantity::CpuCoreVoltage => "cpu_core_voltage",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Quantity::Temperature | Quantity::CpuTemperature => "°C",
            Quantity::Pressure => "Pa",
            Quantity::Humidity => "%RH",
            Quantity::CpuCoreVoltage => "V",
        }
    }
}
