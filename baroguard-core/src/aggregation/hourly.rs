//! Hour-of-day averages over the last 24 hours
//!
//! Keys are whole hours since the Unix epoch, so ordering and lookup are plain
//! integer operations and no string formatting happens while folding. The
//! civil `(year, month, day, hour)` of a key is only computed for display, in
//! UTC.
//!
//! ```text
//!  first_hour_start                      current_hour_start     current_hour_end
//!        │ key-23 │ key-22 │   ...   │ key-1 │ key (contains now) │
//!        └────────────────────── 24 slots ──────────────────────────┘
//! ```

use alloc::collections::BTreeMap;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, Datelike, Timelike};

use super::{Bucket, SummaryRecord};
use crate::constants::{HOURS_PER_DAY, MS_PER_HOUR};
use crate::measurement::{Measurement, Quantity};
use crate::time::{hours_since_epoch, Timestamp};

/// Whole hours since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourKey(pub u64);

/// Calendar form of an [`HourKey`], UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilHour {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
}

impl HourKey {
    /// Hour containing `ts`
    pub fn containing(ts: Timestamp) -> Self {
        Self(hours_since_epoch(ts))
    }

    /// First millisecond of the hour
    pub fn start(self) -> Timestamp {
        self.0.saturating_mul(MS_PER_HOUR)
    }

    /// First millisecond after the hour, clamped to `u64::MAX` for the last
    /// representable hour
    pub fn end(self) -> Timestamp {
        self.start().saturating_add(MS_PER_HOUR)
    }

    /// `None` past chrono's representable range
    pub fn civil(self) -> Option<CivilHour> {
        let secs = i64::try_from(self.0.checked_mul(3600)?).ok()?;
        let at = DateTime::from_timestamp(secs, 0)?;
        Some(CivilHour {
            year: at.year(),
            month: at.month(),
            day: at.day(),
            hour: at.hour(),
        })
    }
}

impl fmt::Display for HourKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.civil() {
            Some(c) => write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:00Z",
                c.year, c.month, c.day, c.hour
            ),
            None => write!(f, "hour#{}", self.0),
        }
    }
}

/// One bucket per [`Quantity`] for a single hour
#[derive(Debug, Clone, PartialEq)]
pub struct HourSlot {
    key: HourKey,
    buckets: [Bucket; 5],
}

impl HourSlot {
    fn new(key: HourKey) -> Self {
        let label = key.to_string();
        Self {
            key,
            buckets: Quantity::ALL.map(|_| Bucket::new(label.clone())),
        }
    }

    pub fn key(&self) -> HourKey {
        self.key
    }

    pub fn bucket(&self, quantity: Quantity) -> &Bucket {
        &self.buckets[quantity.index()]
    }

    /// Readings folded into this hour
    pub fn count(&self) -> u32 {
        self.buckets[0].count
    }

    /// Per-field averages as a measurement stamped with the hour start
    pub fn averages(&self) -> Measurement {
        let avg = |q: Quantity| self.bucket(q).avg as f32;
        Measurement {
            timestamp: self.key.start(),
            temperature: avg(Quantity::Temperature),
            pressure: avg(Quantity::Pressure),
            humidity: avg(Quantity::Humidity),
            cpu_temp: avg(Quantity::CpuTemperature),
            cpu_core_voltage: avg(Quantity::CpuCoreVoltage),
        }
    }

    fn add(&mut self, m: &Measurement) {
        for q in Quantity::ALL {
            self.buckets[q.index()].add_value(m.value(q) as f64);
        }
    }
}

/// Ordered hour-of-day slots covering the last 24 hours
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyBuckets {
    slots: BTreeMap<HourKey, HourSlot>,
}

impl HourlyBuckets {
    /// Pre-create the 24 hours ending with the one containing `now`, then
    /// fold every reading that falls inside them
    ///
    /// Readings before the first hour or at/after the end of the current hour
    /// are ignored. Within 23 hours of the epoch fewer slots exist.
    ///
    /// # Panics
    ///
    /// If an in-range reading has no slot. That would mean the key range and
    /// the filter disagree.
    pub fn last_24_hours(readings: &[Measurement], now: Timestamp) -> Self {
        let current = HourKey::containing(now);
        let first = HourKey(current.0.saturating_sub(HOURS_PER_DAY - 1));

        let slots = (first.0..=current.0)
            .map(|h| (HourKey(h), HourSlot::new(HourKey(h))))
            .collect::<BTreeMap<_, _>>();
        let mut buckets = Self { slots };

        let (start, end) = (first.start(), current.end());
        for m in readings.iter().filter(|m| m.timestamp >= start && m.timestamp < end) {
            let key = HourKey::containing(m.timestamp);
            let slot = buckets
                .slots
                .get_mut(&key)
                .unwrap_or_else(|| panic!("no hour slot for in-range key {}", key.0));
            slot.add(m);
        }

        buckets
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, key: HourKey) -> Option<&HourSlot> {
        self.slots.get(&key)
    }

    /// Slots oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HourSlot> {
        self.slots.values()
    }

    /// One record per hour for `quantity`, oldest first
    pub fn records(&self, quantity: Quantity) -> Vec<SummaryRecord> {
        self.iter()
            .map(|slot| SummaryRecord::from(slot.bucket(quantity)))
            .collect()
    }
}
