//! JSON rendering of summary records

use baroguard_core::{HourlyBuckets, Quantity, SummaryRecord};

use crate::ReportError;

/// Render records as a compact JSON list
pub fn render_json(records: &[SummaryRecord]) -> Result<String, ReportError> {
    Ok(serde_json::to_string(records)?)
}

/// Render one record per hour of `buckets` for `quantity`, oldest first
pub fn render_hourly_json(buckets: &HourlyBuckets, quantity: Quantity) -> Result<String, ReportError> {
    render_json(&buckets.records(quantity))
}
