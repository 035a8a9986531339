//! Timestamp conversion
//!
//! The store records timestamps as seconds (possibly fractional) from the
//! host application's reference point of 2001-01-01T00:00:00 UTC, not from
//! the Unix epoch.

use chrono::DateTime;

/// Unix timestamp of 2001-01-01T00:00:00 UTC
const REFERENCE_EPOCH_UNIX: i64 = 978_307_200;

/// Convert a store timestamp offset to an ISO 8601 string with UTC offset
pub fn store_timestamp_to_iso(offset_secs: Option<f64>) -> Option<String> {
    let secs = offset_secs?;
    let offset_nanos = (secs * 1e9).round() as i64;
    let nanos = (REFERENCE_EPOCH_UNIX * 1_000_000_000).saturating_add(offset_nanos);
    Some(DateTime::from_timestamp_nanos(nanos).to_rfc3339())
}
