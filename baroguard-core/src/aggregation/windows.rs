//! Trailing-window summaries (last hour, last day, last week)

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::{Bucket, SummaryRecord};
use crate::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_WEEK};
use crate::measurement::{Measurement, Quantity};
use crate::time::Timestamp;

/// A named trailing window ending at the report time
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportWindow {
    pub label: String,
    pub span_ms: u64,
}

impl ReportWindow {
    pub fn new(label: impl Into<String>, span_ms: u64) -> Self {
        Self {
            label: label.into(),
            span_ms,
        }
    }

    pub fn hourly() -> Self {
        Self::new("hourly", MS_PER_HOUR)
    }

    pub fn daily() -> Self {
        Self::new("daily", MS_PER_DAY)
    }

    pub fn weekly() -> Self {
        Self::new("weekly", MS_PER_WEEK)
    }

    /// `[now - span, now)`, clamped at the epoch
    pub fn range(&self, now: Timestamp) -> (Timestamp, Timestamp) {
        (now.saturating_sub(self.span_ms), now)
    }
}

/// Default `hourly`, `daily` and `weekly` windows
pub fn default_windows() -> Vec<ReportWindow> {
    vec![
        ReportWindow::hourly(),
        ReportWindow::daily(),
        ReportWindow::weekly(),
    ]
}

/// Builds one independent [`Bucket`] per configured window
///
/// Windows overlap freely; a reading in the last hour is counted by every
/// window that covers it.
#[derive(Debug, Clone)]
pub struct TimeBucketedAggregator {
    windows: Vec<ReportWindow>,
    quantity: Quantity,
}

impl Default for TimeBucketedAggregator {
    fn default() -> Self {
        Self::new(default_windows(), Quantity::Temperature)
    }
}

impl TimeBucketedAggregator {
    pub fn new(windows: Vec<ReportWindow>, quantity: Quantity) -> Self {
        Self { windows, quantity }
    }

    pub fn windows(&self) -> &[ReportWindow] {
        &self.windows
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Span of the widest window; the history a caller must supply
    pub fn longest_span_ms(&self) -> u64 {
        self.windows.iter().map(|w| w.span_ms).max().unwrap_or(0)
    }

    /// One bucket per window, in configuration order
    pub fn summarize(&self, readings: &[Measurement], now: Timestamp) -> Vec<Bucket> {
        self.windows
            .iter()
            .map(|window| {
                let (start, end) = window.range(now);
                Bucket::from_window(window.label.clone(), readings, self.quantity, start, end)
            })
            .collect()
    }

    /// [`summarize`](Self::summarize) in export form
    pub fn records(&self, readings: &[Measurement], now: Timestamp) -> Vec<SummaryRecord> {
        self.summarize(readings, now)
            .iter()
            .map(SummaryRecord::from)
            .collect()
    }
}
