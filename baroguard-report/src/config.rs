//! Station configuration files

use std::fs;
use std::path::Path;

use baroguard_core::StationConfig;

use crate::ReportError;

/// Parse a JSON station configuration; missing fields keep their defaults
pub fn parse_config(text: &str) -> Result<StationConfig, ReportError> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a JSON station configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<StationConfig, ReportError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    parse_config(&text)
}
