//! Calendar helpers.

use chrono::{Datelike, NaiveDate, Utc, Weekday};

/// Format used by the provider for every date, in paths, query strings and
/// response keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The current calendar day in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

/// Check whether a date falls Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Every weekday in `[start, end]`, ascending. Empty when `start > end`.
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |date| *date <= end)
        .filter(|date| is_weekday(*date))
}
