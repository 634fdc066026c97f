//! Date/time coercion support: parsing, unix-second construction, and the
//! canonical rendering used by the flattener.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical output form: millisecond precision, explicit UTC offset.
/// e.g. `2024-05-01T12:30:00.250+02:00`.
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// A string that is nothing but an integer: treated as unix seconds by the
/// flexible parser.
static UNIX_SECONDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d{1,12}$").expect("static pattern"));

/// Offset-free textual forms accepted in addition to RFC 3339; naive values
/// are taken as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

pub fn render(dt: &DateTime<FixedOffset>) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

/// `fromUnixSeconds`: whole seconds since the epoch. `None` only for
/// out-of-range inputs.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.fixed_offset())
}

/// Fractional unix seconds (float input keeps sub-second precision).
pub fn from_unix_seconds_f64(secs: f64) -> Option<DateTime<FixedOffset>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round() as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos.min(999_999_999))
        .map(|dt| dt.fixed_offset())
}

/// General-purpose parse with format auto-detection, for rich date/time
/// targets. Tries RFC 3339, then RFC 2822, then the naive fallback forms,
/// then bare integers as unix seconds.
pub fn parse_flexible(s: &str) -> Option<DateTime<FixedOffset>> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(t) {
        return Some(dt);
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(t, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
        }
    }
    if UNIX_SECONDS.is_match(t) {
        return t.parse::<i64>().ok().and_then(from_unix_seconds);
    }
    None
}

/// Constructor-from-string for plain date/time targets: RFC 3339, the common
/// space-separated form, or a bare date. No timestamp auto-detection.
pub fn parse_strict(s: &str) -> Option<DateTime<FixedOffset>> {
    let t = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_render_has_millis_and_offset() {
        let dt = DateTime::parse_from_rfc3339("2024-05-01T12:30:00.25+02:00").unwrap();
        assert_eq!(render(&dt), "2024-05-01T12:30:00.250+02:00");
        // and the render parses back to the same instant
        assert_eq!(parse_flexible(&render(&dt)), Some(dt));
    }

    #[test]
    fn unix_seconds_both_ways() {
        let dt = from_unix_seconds(0).unwrap();
        assert_eq!(render(&dt), "1970-01-01T00:00:00.000+00:00");
        let frac = from_unix_seconds_f64(1.5).unwrap();
        assert_eq!(render(&frac), "1970-01-01T00:00:01.500+00:00");
        assert!(from_unix_seconds_f64(f64::NAN).is_none());
    }

    #[test]
    fn flexible_parse_auto_detects() {
        assert!(parse_flexible("2024-05-01T12:30:00+00:00").is_some());
        assert!(parse_flexible("2024-05-01 12:30:00").is_some());
        assert!(parse_flexible("2024-05-01").is_some());
        assert_eq!(
            parse_flexible("1700000000"),
            from_unix_seconds(1_700_000_000)
        );
        assert!(parse_flexible("not a date").is_none());
        assert!(parse_flexible("").is_none());
    }

    #[test]
    fn strict_parse_rejects_timestamps() {
        assert!(parse_strict("2024-05-01T12:30:00Z").is_some());
        assert!(parse_strict("2024-05-01 12:30:00").is_some());
        assert!(parse_strict("1700000000").is_none());
    }
}
