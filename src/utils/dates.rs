use chrono::{Datelike, Duration, Local, NaiveDate};

/// Date format the CBR endpoints expect in query strings
pub const REQUEST_DATE_FORMAT: &str = "%d/%m/%Y";

/// Today's date in the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First and last day of the month preceding `today`'s month
///
/// Rolls back across the year boundary: any day of January 2021 gives
/// 2020-12-01 ..= 2020-12-31.
pub fn previous_month_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first_of_month = today - Duration::days(i64::from(today.day0()));
    let end = first_of_month - Duration::days(1);
    let start = end - Duration::days(i64::from(end.day0()));
    (start, end)
}

/// Format a date as `dd/mm/yyyy`
pub fn format_request_date(date: NaiveDate) -> String {
    date.format(REQUEST_DATE_FORMAT).to_string()
}
