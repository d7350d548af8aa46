// ABOUTME: Timestamp parsing for the extractor variants.
// ABOUTME: Ordered format fallback plus locale-independent month-name tables.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::ExtractError;

/// Month-name tables passed to parsers that must read localized dates.
/// Replaces process-wide locale switching: no global state, no interference
/// between extractors running in the same process.
#[derive(Debug, Clone, Copy)]
pub struct MonthNames {
    pub abbreviated: [&'static str; 12],
    pub full: [&'static str; 12],
}

pub const GERMAN_MONTHS: MonthNames = MonthNames {
    abbreviated: [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    full: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
};

fn utc_from_naive(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).fixed_offset()
}

/// Tries each chrono format in order: first as an offset-aware parse, then as
/// a naive datetime interpreted as UTC. Exhausting every format is an error
/// for the record under construction, never a silently substituted date.
pub fn parse_with_formats(
    value: &str,
    formats: &[&str],
) -> Result<DateTime<FixedOffset>, ExtractError> {
    let value = value.trim();
    for format in formats {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(utc_from_naive(naive));
        }
    }
    Err(ExtractError::timestamp(value, formats.join(" | ")))
}

/// Parses a Soundcloud `pretty-date` title such as
/// `"December, 04 2014 09:30:00 +0000"`.
///
/// The target format has no timezone support, so the trailing offset marker
/// (always six characters) is cut before parsing; the remainder is taken as
/// UTC.
pub fn parse_pretty_date(value: &str) -> Result<DateTime<FixedOffset>, ExtractError> {
    const FORMAT: &str = "%B, %d %Y %H:%M:%S";

    let trimmed = value
        .get(..value.len().saturating_sub(6))
        .unwrap_or(value)
        .trim_end();
    NaiveDateTime::parse_from_str(trimmed, FORMAT)
        .map(utc_from_naive)
        .map_err(|_| ExtractError::timestamp(value, FORMAT))
}

/// Parses a tweet timestamp such as `"14:30 - 3. Jan. 2015"` (abbreviated
/// month, primary) or `"14:30 - 3. Januar 2015"` (full month, secondary).
///
/// Month names come from the supplied table; times carry no offset and are
/// taken as UTC.
pub fn parse_tweet_timestamp(
    value: &str,
    months: &MonthNames,
) -> Result<DateTime<FixedOffset>, ExtractError> {
    const FORMATS: &str = "%H:%M - %d. %b. %Y | %H:%M - %d. %B %Y (localized month names)";
    let fail = || ExtractError::timestamp(value, FORMATS);

    let (time_part, date_part) = value.trim().split_once(" - ").ok_or_else(fail)?;
    let time = NaiveTime::parse_from_str(time_part, "%H:%M").map_err(|_| fail())?;

    let mut parts = date_part.split_whitespace();
    let (day_token, month_token, year_token) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(d), Some(m), Some(y), None) => (d, m, y),
            _ => return Err(fail()),
        };

    let day: u32 = day_token.strip_suffix('.').ok_or_else(fail)?.parse().map_err(|_| fail())?;
    let year: i32 = year_token.parse().map_err(|_| fail())?;

    // Primary form abbreviates the month with a trailing dot; the secondary
    // form spells it out.
    let month = match month_token.strip_suffix('.') {
        Some(abbreviated) => month_number(abbreviated, &months.abbreviated),
        None => month_number(month_token, &months.full),
    }
    .ok_or_else(fail)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(fail)?;
    Ok(utc_from_naive(date.and_time(time)))
}

fn month_number(token: &str, table: &[&str; 12]) -> Option<u32> {
    table
        .iter()
        .position(|name| *name == token)
        .map(|i| i as u32 + 1)
}

/// Parses the JSON publication date, a single fixed format: `"%Y-%m-%dT%H:%M:%SZ"`.
pub fn parse_publication_date(value: &str) -> Result<DateTime<FixedOffset>, ExtractError> {
    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    NaiveDateTime::parse_from_str(value.trim(), FORMAT)
        .map(utc_from_naive)
        .map_err(|_| ExtractError::timestamp(value, FORMAT))
}
