//! # Report Date Resolution
//!
//! The report always covers the calendar day before the run. The current time
//! is passed in by the caller so the resolution can be tested against fixed
//! instants.

use crate::constants::DATE_FORMAT;
use chrono::{DateTime, Days, NaiveDate, TimeZone};

/// Returns the day before `now`'s date, in `now`'s own time zone.
pub fn resolve_report_date<Tz: TimeZone>(now: DateTime<Tz>) -> NaiveDate {
    let today = now.date_naive();
    today
        .checked_sub_days(Days::new(1))
        .unwrap_or(NaiveDate::MIN)
}

/// Formats a report date as `YYYY-MM-DD`.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
