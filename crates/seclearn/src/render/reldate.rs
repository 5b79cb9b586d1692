//! Relative date labels.

use chrono::{Datelike, NaiveDate};

use crate::model::calendar_date;

/// Describe a stored date relative to `today`.
///
/// Same day is "오늘", the day before "어제", two to six days back
/// "N일 전", anything else (including future dates) "M월 D일". Empty input
/// gives an empty label and unparsable input is shown as is.
#[must_use]
pub fn relative_date(raw: &str, today: NaiveDate) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let Some(date) = calendar_date(raw) else {
        return raw.to_string();
    };

    match (today - date).num_days() {
        0 => "오늘".to_string(),
        1 => "어제".to_string(),
        days @ 2..=6 => format!("{days}일 전"),
        _ => format!("{}월 {}일", date.month(), date.day()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_today_and_yesterday() {
        assert_eq!(relative_date("2025-03-10", today()), "오늘");
        assert_eq!(relative_date("2025-03-09", today()), "어제");
    }

    #[test]
    fn test_days_ago() {
        assert_eq!(relative_date("2025-03-08", today()), "2일 전");
        assert_eq!(relative_date("2025-03-04", today()), "6일 전");
    }

    #[test]
    fn test_a_week_or_more_shows_month_and_day() {
        assert_eq!(relative_date("2025-03-03", today()), "3월 3일");
        assert_eq!(relative_date("2024-12-25", today()), "12월 25일");
    }

    #[test]
    fn test_future_date_shows_month_and_day() {
        assert_eq!(relative_date("2025-03-11", today()), "3월 11일");
    }

    #[test]
    fn test_empty_and_unparsable() {
        assert_eq!(relative_date("", today()), "");
        assert_eq!(relative_date("last week", today()), "last week");
    }

    #[test]
    fn test_timestamp_input() {
        assert_eq!(relative_date("2025-03-09T08:00:00Z", today()), "어제");
    }
}
