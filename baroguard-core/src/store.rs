//! In-memory measurement history
//!
//! Keeps measurements in insertion order and drops anything older than the
//! retention period on every insert, so a station that runs for months holds
//! at most one retention window of rows.
//!
//! ## Example
//!
//! ```rust
//! use baroguard_core::store::MemoryStore;
//! use baroguard_core::traits::MeasurementStore;
//! use baroguard_core::measurement::Measurement;
//!
//! let mut store = MemoryStore::with_retention(10_000);
//! store.create(Measurement::at(1_000)).unwrap();
//! store.create(Measurement::at(20_000)).unwrap();
//!
//! // The first row fell out of the retention window
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.list(0, u64::MAX).len(), 1);
//! ```

use alloc::vec::Vec;

use crate::errors::StoreError;
use crate::measurement::Measurement;
use crate::time::Timestamp;
use crate::traits::MeasurementStore;

/// [`MeasurementStore`] backed by a `Vec`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Vec<Measurement>,
    /// `None` keeps everything
    retention_ms: Option<u64>,
}

impl MemoryStore {
    /// Unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that forgets rows older than `retention_ms` behind the newest
    pub fn with_retention(retention_ms: u64) -> Self {
        Self {
            rows: Vec::new(),
            retention_ms: Some(retention_ms),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop every row with `timestamp < cutoff`; returns how many went
    pub fn prune_before(&mut self, cutoff: Timestamp) -> usize {
        let before = self.rows.len();
        self.rows.retain(|m| m.timestamp >= cutoff);
        before - self.rows.len()
    }
}

impl MeasurementStore for MemoryStore {
    fn create(&mut self, measurement: Measurement) -> Result<(), StoreError> {
        if measurement.timestamp == 0 {
            return Err(StoreError::Rejected {
                reason: "measurement has no timestamp",
            });
        }

        self.rows.push(measurement);

        if let Some(retention) = self.retention_ms {
            let cutoff = measurement.timestamp.saturating_sub(retention);
            let dropped = self.prune_before(cutoff);
            if dropped > 0 {
                log_debug!("Pruned {} measurements older than {}", dropped, cutoff);
            }
        }
        Ok(())
    }

    fn list(&self, start: Timestamp, end: Timestamp) -> Vec<Measurement> {
        self.rows
            .iter()
            .filter(|m| m.timestamp >= start && m.timestamp < end)
            .copied()
            .collect()
    }
}
