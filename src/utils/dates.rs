//! Calendar helpers shared by the handlers, views and renderers.

use chrono::{Duration, Local, NaiveDate};

/// Source of "today" for defaults and day comparisons.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Real clock backed by the local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date, for tests and replayed scripts.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

const FORM_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// `date` shifted by `days`, or `None` when the result leaves chrono's range.
pub fn checked_add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// Like [`checked_add_days`], keeping `date` when the shift is out of range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    checked_add_days(date, days).unwrap_or(date)
}

pub fn is_same_day(left: NaiveDate, right: NaiveDate) -> bool {
    left == right
}

pub fn is_tomorrow(date: NaiveDate, today: NaiveDate) -> bool {
    today.succ_opt() == Some(date)
}

/// Parses a date typed into a form. Returns `None` for blank or
/// unrecognized input so callers can fall back to their default.
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    FORM_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// `Mar 15`
pub fn format_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `Mar 15, 2024`
pub fn format_long(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Mar 2024`, the bucket label used by the monthly expense series.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// `2024-03-15`, the value an HTML date input carries.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_days_crosses_month_and_year_boundaries() {
        assert_eq!(add_days(date(2024, 12, 15), 90), date(2025, 3, 15));
        assert_eq!(add_days(date(2024, 3, 1), -1), date(2024, 2, 29));
    }

    #[test]
    fn oversized_shifts_do_not_panic() {
        let today = date(2024, 5, 20);
        assert_eq!(checked_add_days(today, 200_000_000_000_000), None);
        assert_eq!(checked_add_days(today, 5_000_000_000), None);
        assert_eq!(checked_add_days(today, i64::MIN), None);
        assert_eq!(add_days(today, i64::MAX), today);
    }

    #[test]
    fn parse_form_date_accepts_iso_and_us_formats() {
        assert_eq!(parse_form_date("2024-04-01"), Some(date(2024, 4, 1)));
        assert_eq!(parse_form_date(" 04/01/2024 "), Some(date(2024, 4, 1)));
        assert_eq!(parse_form_date("next tuesday"), None);
        assert_eq!(parse_form_date("   "), None);
    }

    #[test]
    fn tomorrow_is_relative_to_today() {
        let today = date(2024, 2, 28);
        assert!(is_tomorrow(date(2024, 2, 29), today));
        assert!(!is_tomorrow(today, today));
        assert!(is_same_day(today, date(2024, 2, 28)));
    }

    #[test]
    fn labels_match_dashboard_formats() {
        let planted = date(2024, 3, 5);
        assert_eq!(format_short(planted), "Mar 5");
        assert_eq!(format_long(planted), "Mar 5, 2024");
        assert_eq!(month_label(planted), "Mar 2024");
        assert_eq!(format_iso(planted), "2024-03-05");
    }
}
