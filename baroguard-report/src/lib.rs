//! Summary Export for BaroGuard Stations
//!
//! ## Overview
//!
//! The core publishes hi/low/average summaries through the
//! [`SummarySink`](baroguard_core::SummarySink) trait. This crate provides the
//! sinks a Raspberry Pi station actually uses:
//!
//! - [`JsonFileSink`]: rewrites `measurements.json` in a data directory after
//!   every cycle, for a web page or dashboard to poll
//! - [`render_json`]: the same document in memory
//!
//! ## Document Shape
//!
//! ```text
//! [
//!   {"title": "hourly", "hi": 21.4, "low": 19.9, "avg": 20.6, "count": 60},
//!   {"title": "daily",  "hi": 24.1, "low": 12.0, "avg": 17.8, "count": 1440},
//!   {"title": "weekly", "hi": null, "low": null, "avg": 0.0,  "count": 0}
//! ]
//! ```
//!
//! An empty window has `count: 0` and `null` for `hi`/`low`.
//!
//! ## File Replacement
//!
//! Readers must never see a half-written document. The sink writes a
//! temporary file next to the target and renames it over the old one, which
//! is atomic on the same filesystem.
//!
//! ## Example Usage
//!
//! ```rust
//! use baroguard_core::{Measurement, SummarySink, TimeBucketedAggregator};
//! use baroguard_report::JsonFileSink;
//!
//! let dir = tempfile::tempdir()?;
//! let mut sink = JsonFileSink::new(dir.path());
//!
//! let readings = [Measurement { temperature: 21.0, ..Measurement::at(1_000) }];
//! let records = TimeBucketedAggregator::default().records(&readings, 2_000);
//! sink.publish(&records)?;
//!
//! assert!(dir.path().join("measurements.json").exists());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod file;
mod json;

pub use config::{load_config, parse_config};
pub use file::{JsonFileSink, SinkStats, SUMMARY_FILE_NAME};
pub use json::{render_hourly_json, render_json};

use thiserror::Error;

/// Export errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
