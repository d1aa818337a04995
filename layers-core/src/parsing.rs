//! Normalizers for the free-text fields found in forecast periods.

use chrono::DateTime;

use crate::error::FetchError;

/// Parse a wind-speed string such as `"7 mph"`, `"10-15 mph"` or `"calm"`
/// into miles per hour.
///
/// Ranges joined by a hyphen become the mean of both ends. Anything that
/// does not parse yields `0.0`; this function never fails.
pub fn parse_wind_speed(text: &str) -> f64 {
    let normalized = text.trim().to_lowercase();

    if normalized.is_empty() || normalized == "calm" {
        return 0.0;
    }

    let value = normalized.strip_suffix("mph").unwrap_or(&normalized).trim();

    if value.contains('-') {
        let parts: Vec<&str> = value.split('-').collect();
        if let [low, high] = parts.as_slice() {
            if let (Some(low), Some(high)) = (parse_number(low), parse_number(high)) {
                return (low + high) / 2.0;
            }
        }
    }

    parse_number(value).unwrap_or(0.0)
}

fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format an ISO-8601 timestamp with offset for display, e.g.
/// `"2025-10-27T12:00:00-04:00"` becomes
/// `"12:00 PM UTC-04:00 on October 27, 2025"`.
pub fn parse_timestamp(iso8601: &str) -> Result<String, FetchError> {
    let parsed = DateTime::parse_from_rfc3339(iso8601.trim()).map_err(|source| {
        FetchError::Timestamp {
            value: iso8601.to_string(),
            source,
        }
    })?;

    Ok(format!(
        "{} UTC{} on {}",
        parsed.format("%I:%M %p"),
        parsed.format("%:z"),
        parsed.format("%B %d, %Y"),
    ))
}
