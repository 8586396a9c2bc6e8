//! Month arithmetic and date parsing shared by the loaders and the engine

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First-of-month dates from `start` through `end`, inclusive
pub fn month_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    let mut current = month_start(start);
    let last = month_start(end);

    while current <= last {
        months.push(current);
        match current.checked_add_months(Months::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }
    months
}

/// Parse a CSV date cell
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS` (what a dataframe export
/// writes for timestamp columns).
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_start() {
        assert_eq!(month_start(date(2025, 2, 28)), date(2025, 2, 1));
        assert_eq!(month_start(date(2025, 2, 1)), date(2025, 2, 1));
    }

    #[test]
    fn test_month_range_crosses_year_end() {
        let months = month_range(date(2024, 11, 15), date(2025, 2, 3));
        assert_eq!(
            months,
            vec![date(2024, 11, 1), date(2024, 12, 1), date(2025, 1, 1), date(2025, 2, 1)]
        );
        assert!(month_range(date(2025, 3, 1), date(2025, 2, 1)).is_empty());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2025-03-01"), Some(date(2025, 3, 1)));
        assert_eq!(parse_date(" 2025-03-01 00:00:00 "), Some(date(2025, 3, 1)));
        assert_eq!(parse_date("03/01/2025"), None);
    }
}
