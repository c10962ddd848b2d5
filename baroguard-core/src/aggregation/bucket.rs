//! Running hi/low/average accumulator

use alloc::string::String;

use crate::measurement::{Measurement, Quantity};
use crate::time::Timestamp;

/// Running statistics over a stream of values
///
/// Starts empty with `hi = -∞`, `low = +∞`, `avg = 0` and `count = 0`. Values
/// are only ever added.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub hi: f64,
    pub low: f64,
    pub avg: f64,
    pub count: u32,
}

impl Bucket {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            hi: f64::NEG_INFINITY,
            low: f64::INFINITY,
            avg: 0.0,
            count: 0,
        }
    }

    /// Fold every reading with `start <= timestamp < end`
    pub fn from_window(
        label: impl Into<String>,
        readings: &[Measurement],
        quantity: Quantity,
        start: Timestamp,
        end: Timestamp,
    ) -> Self {
        let mut bucket = Self::new(label);
        readings
            .iter()
            .filter(|m| m.timestamp >= start && m.timestamp < end)
            .for_each(|m| bucket.add_value(m.value(quantity) as f64));
        bucket
    }

    /// Fold one value into the running statistics
    pub fn add_value(&mut self, value: f64) {
        if value > self.hi {
            self.hi = value;
        }
        if value < self.low {
            self.low = value;
        }
        let n = self.count as f64;
        self.avg = (self.avg * n + value) / (n + 1.0);
        self.count += 1;
    }

    /// False while `hi`/`low` still hold their sentinels
    pub fn has_samples(&self) -> bool {
        self.count > 0
    }
}
