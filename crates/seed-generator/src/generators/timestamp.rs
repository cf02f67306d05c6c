//! Timestamp value generator.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use seed_core::GeneratedValue;

/// Generate a random timestamp (second precision) in the given range.
///
/// Bounds are RFC 3339 timestamps or `YYYY-MM-DD` dates. If only one bound
/// parses it is used as is; if neither does the result is `Null`.
pub fn generate_timestamp_range<R: Rng>(rng: &mut R, start: &str, end: &str) -> GeneratedValue {
    match (parse_timestamp(start), parse_timestamp(end)) {
        (Some(start), Some(end)) => {
            let (start_ts, end_ts) = (start.timestamp(), end.timestamp());
            if start_ts >= end_ts {
                return GeneratedValue::DateTime(start);
            }
            let random_ts = rng.gen_range(start_ts..=end_ts);
            let dt = DateTime::from_timestamp(random_ts, 0).unwrap_or(start);
            GeneratedValue::DateTime(dt)
        }
        (Some(dt), None) | (None, Some(dt)) => GeneratedValue::DateTime(dt),
        (None, None) => GeneratedValue::Null,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
