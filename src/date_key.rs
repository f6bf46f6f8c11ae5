//! Canonical `YYYY-MM-DD` keys identifying a calendar day.
//!
//! Every per-day mapping in the roster (overrides, extra hours, notes, holiday
//! tables) is keyed by these strings. Keys are built from calendar fields only,
//! so a key never shifts with the viewer's time zone.

use crate::error::{RosterError, RosterResult};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};

/// Format a calendar date as its date key. Month and day are zero-padded to
/// two digits, the year is written as is.
pub fn date_key(date: NaiveDate) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Parse a date key back into a calendar date.
pub fn parse_date_key(key: &str) -> RosterResult<NaiveDate> {
    let malformed = || RosterError::MalformedDateKey(key.to_string());

    // A leading '-' belongs to a negative year, not a separator.
    let (sign, body) = match key.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, key),
    };
    let mut parts = body.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    let year: i32 = y.trim().parse().map_err(|_| malformed())?;
    let month: u32 = m.trim().parse().map_err(|_| malformed())?;
    let day: u32 = d.trim().parse().map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(sign * year, month, day).ok_or_else(malformed)
}

/// Parse a stored calendar date string.
///
/// Accepts a bare date key and also a timestamp-looking string
/// (`2025-06-10T00:00:00Z`), in which case only the date part before `T`
/// is used.
pub fn parse_calendar_date(value: &str) -> RosterResult<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    parse_date_key(date_part).map_err(|_| RosterError::MalformedDateKey(value.to_string()))
}

/// Convert a timestamp to the calendar date it falls on in its own zone.
pub fn calendar_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> NaiveDate {
    timestamp.date_naive()
}

/// Weekday index with 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn pads_month_and_day() {
        assert_eq!(date_key(d(2025, 1, 5)), "2025-01-05");
        assert_eq!(date_key(d(2025, 12, 31)), "2025-12-31");
    }

    #[test]
    fn year_is_not_padded() {
        assert_eq!(date_key(d(987, 3, 4)), "987-03-04");
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "2025", "2025-13-01", "2025-02-30", "abc-01-01", "2025-01-01-01"] {
            assert!(parse_date_key(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn accepts_unpadded_fields() {
        assert_eq!(parse_date_key("2025-6-9").unwrap(), d(2025, 6, 9));
    }

    #[test]
    fn timestamp_strings_keep_their_date_part() {
        assert_eq!(
            parse_calendar_date("2025-06-10T23:30:00Z").unwrap(),
            d(2025, 6, 10)
        );
    }

    #[test]
    fn calendar_date_uses_the_timestamp_zone() {
        let lisbon_summer = FixedOffset::east_opt(3600).unwrap();
        let ts = lisbon_summer.with_ymd_and_hms(2025, 6, 10, 0, 30, 0).unwrap();
        assert_eq!(calendar_date(&ts), d(2025, 6, 10));
        assert_eq!(calendar_date(&ts.with_timezone(&Utc)), d(2025, 6, 9));
    }

    #[test]
    fn weekday_index_starts_on_sunday() {
        assert_eq!(weekday_index(d(2025, 6, 8)), 0);
        assert_eq!(weekday_index(d(2025, 6, 14)), 6);
    }
}
