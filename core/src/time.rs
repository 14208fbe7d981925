use crate::error::ReportError;
use chrono::{Duration, NaiveDate, NaiveTime};

/// Canonical textual form used everywhere inside the pipeline.
pub const CANONICAL_FORMAT: &str = "%d-%m-%Y";
/// Short form used on rendering surfaces only; never compared or sorted.
pub const DISPLAY_FORMAT: &str = "%d/%m/%y";

// Tried in this order; the first successful parse wins.
const ACCEPTED_DATE_FORMATS: [&str; 4] = ["%d-%m-%Y", "%d/%m/%Y", "%d-%m-%y", "%d/%m/%y"];
const ACCEPTED_TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Parses a date in any of the four accepted day-month-year forms.
///
/// Unparseable input is a hard error. The upstream exporter used to smuggle a
/// placeholder string through instead, which then leaked into aggregation.
pub fn parse_date(input: &str) -> Result<NaiveDate, ReportError> {
    let trimmed = input.trim();
    for format in ACCEPTED_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(ReportError::InvalidDateFormat(trimmed.to_string()))
}

/// Parses an `HH:MM` or `HH:MM:SS` time of day.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let trimmed = input.trim();
    ACCEPTED_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// English weekday name, independent of locale.
pub fn day_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Ascending chronological sort. Duplicates are kept; dedup is the caller's call.
pub fn sorted(dates: impl IntoIterator<Item = NaiveDate>) -> Vec<NaiveDate> {
    let mut ordered: Vec<NaiveDate> = dates.into_iter().collect();
    ordered.sort();
    ordered
}

pub fn most_recent(dates: impl IntoIterator<Item = NaiveDate>) -> Option<NaiveDate> {
    dates.into_iter().max()
}

/// `num_days` consecutive calendar dates ending at (and including) `anchor`,
/// oldest first. Gaps in activity do not shrink the window.
pub fn date_window(anchor: NaiveDate, num_days: u32) -> Vec<NaiveDate> {
    (0..num_days)
        .rev()
        .map(|back| anchor - Duration::days(i64::from(back)))
        .collect()
}
