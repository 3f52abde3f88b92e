//! Shared helpers for statement date handling.

use chrono::{Datelike, Duration, NaiveDate};

/// Parse a posted date as it appears in statement workbooks: `d/m/Y`,
/// with or without zero padding.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use statement_reporter::utils::parse_statement_date;
///
/// assert_eq!(
///     parse_statement_date("15/06/2024"),
///     NaiveDate::from_ymd_opt(2024, 6, 15)
/// );
/// assert_eq!(
///     parse_statement_date("3/1/2024"),
///     NaiveDate::from_ymd_opt(2024, 1, 3)
/// );
/// assert_eq!(parse_statement_date("2024-06-15"), None);
/// ```
pub fn parse_statement_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y").ok()
}

/// Convert an Excel date serial to a `NaiveDate`.
///
/// Excel stores dates as day counts since Dec 31, 1899; the epoch below is
/// adjusted for Excel's off-by-one leap-year bug.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use statement_reporter::utils::excel_serial_to_date;
///
/// // 45466 = June 23, 2024
/// assert_eq!(
///     excel_serial_to_date(45466.0),
///     NaiveDate::from_ymd_opt(2024, 6, 23)
/// );
/// ```
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial as i64))
}

/// Format a date as the `YYYY-MM` month key used throughout the report.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use statement_reporter::utils::month_key;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
/// assert_eq!(month_key(date), "2024-06");
/// ```
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
