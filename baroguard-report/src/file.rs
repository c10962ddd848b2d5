//! Summary file sink

use std::fs;
use std::path::{Path, PathBuf};

use baroguard_core::{SinkError, SummaryRecord, SummarySink};
use log::{debug, warn};

use crate::{render_json, ReportError};

/// Name of the summary document inside the data directory
pub const SUMMARY_FILE_NAME: &str = "measurements.json";

/// Publish statistics
#[derive(Debug, Default, Clone)]
pub struct SinkStats {
    /// Documents written successfully
    pub published: u64,
    /// Publish attempts that failed
    pub failed: u64,
    /// Bytes written across all documents
    pub bytes_written: u64,
    /// Last error message
    pub last_error: Option<String>,
}

/// Writes `measurements.json` into a data directory
#[derive(Debug)]
pub struct JsonFileSink {
    dir: PathBuf,
    file_name: String,
    stats: SinkStats,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file_name: SUMMARY_FILE_NAME.to_string(),
            stats: SinkStats::default(),
        }
    }

    /// Write to `file_name` instead of `measurements.json`
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    pub fn stats(&self) -> &SinkStats {
        &self.stats
    }

    /// Render and atomically replace the document
    pub fn write(&mut self, records: &[SummaryRecord]) -> Result<PathBuf, ReportError> {
        let result = self.write_document(records);
        match &result {
            Ok(_) => self.stats.published += 1,
            Err(err) => {
                self.stats.failed += 1;
                self.stats.last_error = Some(err.to_string());
            }
        }
        result
    }

    fn write_document(&mut self, records: &[SummaryRecord]) -> Result<PathBuf, ReportError> {
        let document = render_json(records)?;
        fs::create_dir_all(&self.dir).map_err(|e| ReportError::io(&self.dir, e))?;

        let target = self.path();
        let staging = self.dir.join(format!(".{}.tmp", self.file_name));
        write_then_rename(&staging, &target, document.as_bytes())?;

        self.stats.bytes_written += document.len() as u64;
        debug!("Wrote {} summaries to {}", records.len(), target.display());
        Ok(target)
    }
}

fn write_then_rename(staging: &Path, target: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    fs::write(staging, bytes).map_err(|e| ReportError::io(staging, e))?;
    fs::rename(staging, target).map_err(|e| ReportError::io(target, e))
}

impl SummarySink for JsonFileSink {
    fn publish(&mut self, summaries: &[SummaryRecord]) -> Result<(), SinkError> {
        self.write(summaries).map(|_| ()).map_err(|err| {
            warn!("Summary export failed: {}", err);
            match err {
                ReportError::Io { .. } => SinkError::PublishFailed {
                    reason: "cannot write summary file",
                },
                ReportError::Serialization(_) => SinkError::PublishFailed {
                    reason: "cannot serialize summaries",
                },
            }
        })
    }
}
