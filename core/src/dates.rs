//! Timestamp parsing and the human-readable views built on it.
//!
//! Timestamps are stored as the strings the service sent and only parsed
//! here, when a caller asks for a formatted view. A timestamp that cannot be
//! parsed renders as an empty string instead of failing the caller.

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::TimestampError;

/// Layout used by the service for status updates, e.g.
/// `Tue Jan 07 10:00:00 -0800 2014`.
const RUBY_DATE: &str = "%a %b %d %H:%M:%S %z %Y";

/// Layout of `format_short`, e.g. `7 Jan 2014`.
const SHORT_DATE: &str = "%-d %b %Y";

/// Parse a timestamp as RFC 3339, falling back to the Ruby date layout.
pub fn parse_timestamp(input: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let input = input.trim();
    DateTime::parse_from_rfc3339(input)
        .or_else(|_| DateTime::parse_from_str(input, RUBY_DATE))
        .map_err(|_| TimestampError {
            input: input.to_string(),
        })
}

/// Render a timestamp as `2 Jan 2006`, or an empty string if unparsable.
pub fn format_short(input: &str) -> String {
    match parse_timestamp(input) {
        Ok(date) => date.format(SHORT_DATE).to_string(),
        Err(e) => {
            tracing::debug!(error = %e, "cannot format timestamp");
            String::new()
        }
    }
}

/// Elapsed time since `input`, measured against the current clock.
pub fn relative(input: &str) -> String {
    relative_to(input, Utc::now())
}

/// Elapsed time between `input` and `now` as a phrase like `3 days ago`.
pub fn relative_to(input: &str, now: DateTime<Utc>) -> String {
    let date = match parse_timestamp(input) {
        Ok(date) => date,
        Err(e) => {
            tracing::debug!(error = %e, "cannot compute relative date");
            return String::new();
        }
    };

    let elapsed = now.signed_duration_since(date.with_timezone(&Utc));

    match elapsed.num_days() {
        days if days > 1 => return format!("{days} days ago"),
        1 => return "1 day ago".to_string(),
        _ => {}
    }

    match elapsed.num_hours() {
        hours if hours > 1 => return format!("{hours} hours ago"),
        1 => return "1 hour ago".to_string(),
        _ => {}
    }

    let minutes = elapsed.num_minutes();
    if minutes > 2 {
        format!("{minutes} minutes ago")
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, SecondsFormat, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn ago(d: Duration) -> String {
        (now() - d).to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    #[test]
    fn parses_rfc3339() {
        let date = parse_timestamp("2024-03-10T12:00:00Z").unwrap();
        assert_eq!(date.with_timezone(&Utc), now());
    }

    #[test]
    fn parses_ruby_date() {
        let date = parse_timestamp("Sun Mar 10 04:00:00 -0800 2024").unwrap();
        assert_eq!(date.with_timezone(&Utc), now());
    }

    #[test]
    fn rejects_other_layouts() {
        let err = parse_timestamp("10/03/2024").unwrap_err();
        assert_eq!(err.input, "10/03/2024");
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn format_short_uses_day_month_year() {
        assert_eq!(format_short("2024-03-05T08:30:00+00:00"), "5 Mar 2024");
        assert_eq!(format_short("Tue Jan 07 10:00:00 -0800 2014"), "7 Jan 2014");
    }

    #[test]
    fn format_short_unparsable_is_empty() {
        assert_eq!(format_short("yesterday"), "");
    }

    #[test]
    fn relative_just_now() {
        assert_eq!(relative_to(&ago(Duration::zero()), now()), "Just now");
        assert_eq!(relative_to(&ago(Duration::minutes(1)), now()), "Just now");
        assert_eq!(relative_to(&ago(Duration::minutes(2)), now()), "Just now");
    }

    #[test]
    fn relative_minutes() {
        assert_eq!(relative_to(&ago(Duration::minutes(3)), now()), "3 minutes ago");
        assert_eq!(relative_to(&ago(Duration::minutes(59)), now()), "59 minutes ago");
    }

    #[test]
    fn relative_hours() {
        assert_eq!(relative_to(&ago(Duration::hours(1)), now()), "1 hour ago");
        assert_eq!(relative_to(&ago(Duration::minutes(150)), now()), "2 hours ago");
        assert_eq!(relative_to(&ago(Duration::hours(23)), now()), "23 hours ago");
    }

    #[test]
    fn relative_days() {
        assert_eq!(relative_to(&ago(Duration::hours(25)), now()), "1 day ago");
        assert_eq!(relative_to(&ago(Duration::hours(48)), now()), "2 days ago");
        assert_eq!(relative_to(&ago(Duration::days(30)), now()), "30 days ago");
    }

    #[test]
    fn relative_future_is_just_now() {
        assert_eq!(relative_to(&ago(Duration::hours(-5)), now()), "Just now");
    }

    #[test]
    fn relative_accepts_ruby_dates() {
        assert_eq!(relative_to("Fri Mar 08 04:00:00 -0800 2024", now()), "2 days ago");
    }

    #[test]
    fn relative_unparsable_is_empty() {
        assert_eq!(relative_to("not a date", now()), "");
    }
}
