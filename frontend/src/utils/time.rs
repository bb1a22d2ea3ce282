use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config;

fn app_time_zone() -> Tz {
    config::current_time_zone()
}

pub fn now_in_app_tz() -> DateTime<Tz> {
    Utc::now().with_timezone(&app_time_zone())
}

pub fn today_in_app_tz() -> NaiveDate {
    now_in_app_tz().date_naive()
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

pub fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_covers_december_rollover() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let (first, last) = month_bounds(date).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn month_bounds_handles_february() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let (first, last) = month_bounds(date).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn parse_date_input_trims_and_validates() {
        assert_eq!(
            parse_date_input(" 2024-10-15 "),
            NaiveDate::from_ymd_opt(2024, 10, 15)
        );
        assert!(parse_date_input("15/10/2024").is_none());
        assert!(parse_date_input("").is_none());
    }

    #[test]
    fn format_date_is_human_readable() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
        assert_eq!(format_date(date), "Oct 15, 2024");
    }
}
