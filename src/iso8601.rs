//! ISO 8601 timestamp parsing.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, ParseError, Utc};

/// Parses an ISO 8601 date-time.
///
/// Accepted forms, tried in order: RFC 3339 (a UTC offset is respected and
/// converted), a date-time without an offset (UTC is assumed, with or
/// without seconds), and a bare date (midnight UTC). The second tuple
/// element is the precision of the input: one second, one minute or one day.
///
/// The error returned is the one from the bare-date parse, the most general
/// form.
pub fn parse_iso8601(s: &str) -> Result<(DateTime<Utc>, Duration), ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok((dt.with_timezone(&Utc), Duration::seconds(1)));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok((dt.and_utc(), Duration::seconds(1)));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok((dt.and_utc(), Duration::minutes(1)));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    Ok((date.and_time(NaiveTime::MIN).and_utc(), Duration::days(1)))
}
