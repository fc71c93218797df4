//! Calendar bucket keys derived from ticket creation dates

use chrono::Datelike;

/// ISO-8601 week bucket, formatted `YYYY-WNN`.
///
/// The year is the ISO week-numbering year, so the last days of December can
/// land in week 1 of the following year.
pub fn week_bucket<D: Datelike>(date: &D) -> String {
    let week = date.iso_week();
    format!("{:04}-W{:02}", week.year(), week.week())
}

/// Calendar month bucket, formatted `YYYY-MM`.
pub fn month_bucket<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
