//! Timezone normalization and display formatting.
//!
//! Instants are stored and transmitted as ISO-8601 strings that are UTC by
//! contract; everything the user sees is derived from them per target IANA
//! zone at render time. Conversions go through the zone database for the
//! instant in question, so historical offsets (including DST transitions)
//! come out right regardless of when the conversion runs.

use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Duration, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use thiserror::Error;

/// Default display pattern: `March 10, 2024 at 3:00 AM`.
pub const DEFAULT_PATTERN: &str = "%B %-d, %Y at %-I:%M %p";

/// Upper bound, in minutes, when scanning past a spring-forward gap.
/// Covers even calendar-day skips (Pacific/Apia, 2011).
const MAX_GAP_SCAN_MINUTES: i64 = 26 * 60;

#[derive(Error, Debug)]
pub enum TimeError {
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid format pattern: {0}")]
    InvalidPattern(String),
}

/// Curated zone list for the timezone selector.
pub const COMMON_TIMEZONES: &[(Tz, &str)] = &[
    (chrono_tz::America::New_York, "Eastern Time (ET)"),
    (chrono_tz::America::Chicago, "Central Time (CT)"),
    (chrono_tz::America::Denver, "Mountain Time (MT)"),
    (chrono_tz::America::Los_Angeles, "Pacific Time (PT)"),
    (chrono_tz::Europe::London, "London (GMT)"),
    (chrono_tz::Europe::Paris, "Paris (CET)"),
    (chrono_tz::Europe::Berlin, "Berlin (CET)"),
    (chrono_tz::Asia::Tokyo, "Tokyo (JST)"),
    (chrono_tz::Asia::Kolkata, "India (IST)"),
    (chrono_tz::Asia::Shanghai, "Shanghai (CST)"),
    (chrono_tz::Australia::Sydney, "Sydney (AEST)"),
    (Tz::UTC, "UTC"),
];

/// Resolve the runtime's IANA timezone. Never fails; unresolvable or
/// unrecognized platform zones fall back to UTC.
pub fn resolve_local_timezone() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC)
}

/// Look up an IANA zone identifier.
pub fn parse_timezone(name: &str) -> Result<Tz, TimeError> {
    name.parse()
        .map_err(|_| TimeError::InvalidTimezone(name.to_string()))
}

/// Parse an ISO-8601 instant.
///
/// Bare values (no offset) are UTC by contract. Values carrying an explicit
/// offset (`Z` or `±hh:mm`) are normalized to UTC rather than guessed at.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, TimeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(TimeError::InvalidDate(s.to_string()))
}

/// Render a UTC instant as an ISO-8601 string with an explicit `Z` marker.
pub fn utc_string(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a stored instant as wall-clock time in `tz`.
///
/// `pattern` is a strftime pattern; `%Z` renders the zone abbreviation in
/// effect at the instant itself, not at render time. The output is a pure
/// function of `(instant, tz, pattern)`.
pub fn format_instant(instant: &str, tz: Tz, pattern: &str) -> Result<String, TimeError> {
    let utc = parse_instant(instant)?;
    format_in_zone(utc, tz, pattern)
}

/// Format an already-parsed UTC instant in `tz`.
pub fn format_in_zone(instant: DateTime<Utc>, tz: Tz, pattern: &str) -> Result<String, TimeError> {
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(TimeError::InvalidPattern(pattern.to_string()));
    }
    let local = instant.with_timezone(&tz);
    Ok(local.format_with_items(items.into_iter()).to_string())
}

/// Convert a wall-clock date+time read in `tz` to the UTC instant it names.
///
/// Wall-clock times around DST transitions need an explicit policy:
/// - ambiguous times (the fall-back hour occurs twice) resolve to the
///   **later** of the two UTC instants;
/// - non-existent times (inside a spring-forward gap) resolve to the first
///   instant **after** the gap, probed at minute granularity.
pub fn convert_wall_clock_to_utc(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, TimeError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, later) => Ok(later.with_timezone(&Utc)),
        LocalResult::None => {
            let mut probe = truncate_to_minute(local);
            for _ in 0..MAX_GAP_SCAN_MINUTES {
                probe += Duration::minutes(1);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(dt) => return Ok(dt.with_timezone(&Utc)),
                    LocalResult::Ambiguous(_, later) => return Ok(later.with_timezone(&Utc)),
                    LocalResult::None => continue,
                }
            }
            Err(TimeError::InvalidDate(local.to_string()))
        }
    }
}

/// Short offset label for `tz` at the current instant ("EST", "GMT+5:45").
/// Selector/display use only; never stored.
pub fn offset_label(tz: Tz) -> String {
    offset_label_at(tz, Utc::now())
}

/// Short offset label for `tz` at a specific instant.
pub fn offset_label_at(tz: Tz, instant: DateTime<Utc>) -> String {
    let local = instant.with_timezone(&tz);
    let abbrev = local.format("%Z").to_string();
    if !abbrev.is_empty() && abbrev.chars().all(|c| c.is_ascii_alphabetic()) {
        return abbrev;
    }

    // Zones without an alphabetic abbreviation get a GMT offset label.
    let secs = local.offset().fix().local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let minutes = secs.abs() / 60;
    let (h, m) = (minutes / 60, minutes % 60);
    if m == 0 {
        format!("GMT{sign}{h}")
    } else {
        format!("GMT{sign}{h}:{m:02}")
    }
}

/// Selector label: city name plus current offset, e.g. `New York (EST)`.
pub fn zone_display_name(tz: Tz) -> String {
    let name = tz.name();
    let city = name.rsplit('/').next().unwrap_or(name).replace('_', " ");
    format!("{} ({})", city, offset_label(tz))
}

fn truncate_to_minute(local: NaiveDateTime) -> NaiveDateTime {
    local
        .with_second(0)
        .and_then(|d| d.with_nanosecond(0))
        .unwrap_or(local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn utc(s: &str) -> DateTime<Utc> {
        parse_instant(s).unwrap()
    }

    #[test]
    fn test_bare_instant_is_utc() {
        assert_eq!(utc("2024-03-10T07:00:00"), utc("2024-03-10T07:00:00Z"));
        assert_eq!(utc("2024-03-10 07:00:00"), utc("2024-03-10T07:00:00Z"));
    }

    #[test]
    fn test_explicit_offset_normalized_to_utc() {
        // The same instant written three ways.
        let expected = utc("2024-03-10T07:00:00Z");
        assert_eq!(utc("2024-03-10T02:00:00-05:00"), expected);
        assert_eq!(utc("2024-03-10T16:00:00+09:00"), expected);
    }

    #[test]
    fn test_fractional_seconds_accepted() {
        let dt = utc("2024-03-10T07:00:00.123456");
        assert_eq!(dt.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_unparseable_instant_rejected() {
        assert!(matches!(
            parse_instant("not-a-date"),
            Err(TimeError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_instant("2024-13-40T99:00:00"),
            Err(TimeError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        assert!(matches!(
            parse_timezone("America/Nowhere"),
            Err(TimeError::InvalidTimezone(_))
        ));
        assert!(parse_timezone("America/New_York").is_ok());
    }

    #[test]
    fn test_dst_boundary_uses_post_transition_offset() {
        // New York springs forward at 02:00 local on 2024-03-10; 07:00Z is
        // the first post-transition instant and must render as EDT.
        let ny = chrono_tz::America::New_York;
        let formatted =
            format_instant("2024-03-10T07:00:00Z", ny, "%Y-%m-%d %H:%M %Z").unwrap();
        assert_eq!(formatted, "2024-03-10 03:00 EDT");

        // One second earlier is still standard time.
        let formatted =
            format_instant("2024-03-10T06:59:59Z", ny, "%H:%M:%S %Z").unwrap();
        assert_eq!(formatted, "01:59:59 EST");
    }

    #[test]
    fn test_historical_offset_not_current_offset() {
        // A January instant always renders in standard time, no matter when
        // the formatting happens.
        let ny = chrono_tz::America::New_York;
        let formatted =
            format_instant("2024-01-15T12:00:00Z", ny, "%H:%M %Z").unwrap();
        assert_eq!(formatted, "07:00 EST");
    }

    #[test]
    fn test_default_pattern_rendering() {
        let tokyo = chrono_tz::Asia::Tokyo;
        let formatted =
            format_instant("2024-03-10T07:00:00Z", tokyo, DEFAULT_PATTERN).unwrap();
        assert_eq!(formatted, "March 10, 2024 at 4:00 PM");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = format_instant("2024-03-10T07:00:00Z", Tz::UTC, "%Q bogus");
        assert!(matches!(err, Err(TimeError::InvalidPattern(_))));
    }

    #[test]
    fn test_wall_clock_round_trip() {
        // Away from any transition, format-then-convert returns the instant.
        let tz = chrono_tz::Asia::Tokyo;
        let instant = utc("2024-06-15T18:30:00Z");
        let wall = format_in_zone(instant, tz, "%Y-%m-%dT%H:%M:%S").unwrap();
        let naive = NaiveDateTime::parse_from_str(&wall, "%Y-%m-%dT%H:%M:%S").unwrap();
        assert_eq!(convert_wall_clock_to_utc(naive, tz).unwrap(), instant);
    }

    #[test]
    fn test_ambiguous_wall_clock_resolves_to_later_instant() {
        // New York falls back on 2024-11-03: 01:30 local happens at both
        // 05:30Z (EDT) and 06:30Z (EST). Policy picks the later.
        let ny = chrono_tz::America::New_York;
        let naive = NaiveDateTime::parse_from_str("2024-11-03T01:30:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let converted = convert_wall_clock_to_utc(naive, ny).unwrap();
        assert_eq!(converted, utc("2024-11-03T06:30:00Z"));
    }

    #[test]
    fn test_nonexistent_wall_clock_resolves_past_gap() {
        // 02:30 local on 2024-03-10 does not exist in New York; the gap ends
        // at 03:00 EDT == 07:00Z.
        let ny = chrono_tz::America::New_York;
        let naive = NaiveDateTime::parse_from_str("2024-03-10T02:30:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let converted = convert_wall_clock_to_utc(naive, ny).unwrap();
        assert_eq!(converted, utc("2024-03-10T07:00:00Z"));

        // Seconds inside the gap do not shift the result.
        let naive = NaiveDateTime::parse_from_str("2024-03-10T02:30:45", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let converted = convert_wall_clock_to_utc(naive, ny).unwrap();
        assert_eq!(converted, utc("2024-03-10T07:00:00Z"));
    }

    #[test]
    fn test_utc_string_has_explicit_marker() {
        let naive = NaiveDateTime::parse_from_str("2024-03-10T02:30:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        let converted = convert_wall_clock_to_utc(naive, chrono_tz::America::New_York).unwrap();
        assert_eq!(utc_string(converted), "2024-03-10T07:00:00Z");
    }

    #[test]
    fn test_offset_labels() {
        let jan = utc("2024-01-15T12:00:00Z");
        let jul = utc("2024-07-15T12:00:00Z");
        assert_eq!(offset_label_at(chrono_tz::America::New_York, jan), "EST");
        assert_eq!(offset_label_at(chrono_tz::America::New_York, jul), "EDT");
        // No alphabetic abbreviation: falls back to a GMT offset.
        assert_eq!(offset_label_at(chrono_tz::Asia::Kathmandu, jan), "GMT+5:45");
    }

    #[test]
    fn test_zone_display_name() {
        // Tokyo has no DST, so the label is stable year-round.
        assert_eq!(zone_display_name(chrono_tz::Asia::Tokyo), "Tokyo (JST)");
    }

    #[test]
    fn test_resolve_local_timezone_never_fails() {
        // Whatever the host is set to, resolution produces a usable zone.
        let tz = resolve_local_timezone();
        assert!(parse_timezone(tz.name()).is_ok());
    }
}
