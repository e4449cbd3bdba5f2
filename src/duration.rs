//! Elapsed-time calculation for alert records.
//!
//! Upstream feeds are inconsistent about timestamp encoding, so parsing
//! accepts RFC 3339 with an offset or `Z`, naive ISO-8601 (assumed UTC), and
//! the legacy `YYYY-MM-DD HH:MM:SS` form. Anything unparseable degrades to a
//! zero duration instead of propagating a failure.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::models::AlertDuration;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse one of the accepted timestamp encodings into a UTC instant.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive ISO-8601 without a zone marker, assumed UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    // Legacy space-separated form, assumed UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    None
}

/// Compute the elapsed duration between an alert's start and end timestamps.
///
/// A missing start means the duration is unknown and yields zero. A missing
/// end means the alert is ongoing and `now` is used. Malformed timestamps
/// are logged and yield zero; an end before the start clamps to zero.
pub fn elapsed(start: Option<&str>, end: Option<&str>, now: DateTime<Utc>) -> AlertDuration {
    let Some(start_raw) = start else {
        return AlertDuration::ZERO;
    };

    let Some(start_at) = parse_timestamp(start_raw) else {
        tracing::warn!(timestamp = start_raw, "Unparseable alert start time");
        return AlertDuration::ZERO;
    };

    let end_at = match end {
        Some(end_raw) => match parse_timestamp(end_raw) {
            Some(parsed) => parsed,
            None => {
                tracing::warn!(timestamp = end_raw, "Unparseable alert end time");
                return AlertDuration::ZERO;
            }
        },
        None => now,
    };

    breakdown(end_at - start_at)
}

/// Break a delta into whole days, hours, and minutes, flooring to whole
/// minutes and clamping negative deltas to zero.
pub fn breakdown(delta: TimeDelta) -> AlertDuration {
    let total_minutes = delta.num_minutes().max(0);
    AlertDuration {
        days: (total_minutes / MINUTES_PER_DAY) as u32,
        hours: ((total_minutes % MINUTES_PER_DAY) / 60) as u32,
        minutes: (total_minutes % 60) as u32,
    }
}
