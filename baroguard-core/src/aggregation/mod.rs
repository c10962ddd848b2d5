//! Time-Bucketed Aggregation
//!
//! ## Overview
//!
//! Turns stored measurement history into the hi/low/average figures the
//! station publishes. Two views are built from the same primitive, a
//! [`Bucket`] of running statistics:
//!
//! - **Trailing windows** ([`TimeBucketedAggregator`]): last hour, last day,
//!   last week, each an independent bucket over `[now - span, now)`.
//! - **Hour of day** ([`HourlyBuckets`]): 24 slots ending with the current
//!   hour, one bucket per measured field in each slot.
//!
//! ## Empty Buckets
//!
//! A bucket that saw no values reports `count == 0` with `hi = -∞` and
//! `low = +∞`. Callers check [`Bucket::has_samples`] before plotting; the
//! JSON export writes the sentinels as `null`.
//!
//! ## Numeric Notes
//!
//! The average is updated incrementally, `avg = (avg·n + v) / (n + 1)`, in
//! `f64`. Over a week of one-minute samples (10 080 values) the drift from the
//! true mean stays far below sensor resolution.

mod bucket;
mod hourly;
mod windows;

pub use bucket::Bucket;
pub use hourly::{CivilHour, HourKey, HourSlot, HourlyBuckets};
pub use windows::{default_windows, ReportWindow, TimeBucketedAggregator};

use alloc::string::String;

/// Export shape of one bucket
///
/// Serializes as `{"title": .., "hi": .., "low": .., "avg": .., "count": ..}`
/// with non-finite values written as `null`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SummaryRecord {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(serialize_with = "finite_or_null"))]
    pub hi: f64,
    #[cfg_attr(feature = "serde", serde(serialize_with = "finite_or_null"))]
    pub low: f64,
    #[cfg_attr(feature = "serde", serde(serialize_with = "finite_or_null"))]
    pub avg: f64,
    pub count: u32,
}

impl From<&Bucket> for SummaryRecord {
    fn from(bucket: &Bucket) -> Self {
        Self {
            title: bucket.label.clone(),
            hi: bucket.hi,
            low: bucket.low,
            avg: bucket.avg,
            count: bucket.count,
        }
    }
}

#[cfg(feature = "serde")]
fn finite_or_null<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::{Measurement, Quantity};
    use proptest::prelude::*;

    extern crate std;
    use std::vec::Vec;

    #[test]
    fn record_copies_bucket() {
        let mut bucket = Bucket::new("weekly");
        bucket.add_value(3.0);
        bucket.add_value(5.0);

        let record = SummaryRecord::from(&bucket);
        assert_eq!(record.title, "weekly");
        assert_eq!((record.hi, record.low, record.avg, record.count), (5.0, 3.0, 4.0, 2));
    }

    proptest! {
        /// Property: incremental statistics equal the batch statistics
        #[test]
        fn prop_running_stats_match_batch(values in prop::collection::vec(-1.0e4f64..1.0e4, 1..400)) {
            let mut bucket = Bucket::new("p");
            for v in &values {
                bucket.add_value(*v);
            }

            let mean = values.iter().sum::<f64>() / values.len() as f64;
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let low = values.iter().cloned().fold(f64::INFINITY, f64::min);

            prop_assert_eq!(bucket.count as usize, values.len());
            prop_assert_eq!(bucket.hi, hi);
            prop_assert_eq!(bucket.low, low);
            prop_assert!((bucket.avg - mean).abs() < 1e-6, "avg {} mean {}", bucket.avg, mean);
        }

        /// Property: every reading inside a window is counted exactly once
        #[test]
        fn prop_window_counts_in_range(offsets in prop::collection::vec(0u64..10_000, 0..200), split in 0u64..10_000) {
            let readings: Vec<Measurement> = offsets.iter().map(|&o| Measurement::at(o)).collect();
            let before = Bucket::from_window("a", &readings, Quantity::Temperature, 0, split);
            let after = Bucket::from_window("b", &readings, Quantity::Temperature, split, 10_000);
            prop_assert_eq!((before.count + after.count) as usize, readings.len());
        }
    }
}
