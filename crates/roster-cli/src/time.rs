//! Conversions between user-facing timestamps and roster timestamps.

use crate::error::{CliError, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use roster_domain::Timestamp;

/// Parse a user-supplied instant.
///
/// Accepts `now`, raw milliseconds since the epoch, an RFC 3339 timestamp,
/// or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_instant(input: &str, now: Timestamp) -> Result<Timestamp> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("now") {
        return Ok(now);
    }
    if let Ok(millis) = input.parse::<u64>() {
        return Ok(millis);
    }

    let parsed = if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        dt.with_timezone(&Utc)
    } else if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| CliError::InvalidInput(format!("Invalid date '{}'", input)))?
            .and_utc()
    } else {
        return Err(CliError::InvalidInput(format!(
            "Invalid timestamp '{}'. Expected 'now', milliseconds, RFC 3339 or YYYY-MM-DD",
            input
        )));
    };

    u64::try_from(parsed.timestamp_millis())
        .map_err(|_| CliError::InvalidInput(format!("Timestamp '{}' is before 1970", input)))
}

/// Render a roster timestamp as RFC 3339 (UTC).
///
/// Milliseconds are shown only when non-zero, so the output parses back to
/// the same timestamp.
pub fn format_instant(at: Timestamp) -> String {
    i64::try_from(at)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_else(|| at.to_string())
}
