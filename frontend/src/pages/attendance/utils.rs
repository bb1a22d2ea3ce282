use chrono::{NaiveDate, NaiveTime, Timelike};
use leptos::*;

use crate::api::{ApiError, AttendanceRecord};
use crate::utils::time::parse_date_input;

pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

pub fn today_record<'a>(
    records: &'a [AttendanceRecord],
    today: NaiveDate,
) -> Option<&'a AttendanceRecord> {
    records.iter().find(|record| record.date == today)
}

/// Checked in and not yet out.
pub fn is_clocked_in(record: Option<&AttendanceRecord>) -> bool {
    record
        .map(|record| record.check_in.is_some() && record.check_out.is_none())
        .unwrap_or(false)
}

#[derive(Clone, Copy)]
pub struct RangeFormState {
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
}

impl RangeFormState {
    pub fn new() -> Self {
        Self {
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
        }
    }

    pub fn set_range(&self, from: NaiveDate, to: NaiveDate) {
        self.start_date.set(from.format("%Y-%m-%d").to_string());
        self.end_date.set(to.format("%Y-%m-%d").to_string());
    }

    pub fn to_payload(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), ApiError> {
        let parse = |signal: RwSignal<String>, label: &str| {
            let raw = signal.get();
            if raw.trim().is_empty() {
                Ok(None)
            } else {
                parse_date_input(&raw)
                    .map(Some)
                    .ok_or_else(|| ApiError::validation(format!("{label} must be YYYY-MM-DD.")))
            }
        };
        let from = parse(self.start_date, "Start date")?;
        let to = parse(self.end_date, "End date")?;
        if let (Some(from), Some(to)) = (from, to) {
            if to < from {
                return Err(ApiError::validation(
                    "End date must be on or after the start date.",
                ));
            }
        }
        Ok((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, check_in: Option<&str>, check_out: Option<&str>) -> AttendanceRecord {
        serde_json::from_value(serde_json::json!({
            "id": "att-1",
            "employee_id": "3",
            "date": date,
            "check_in": check_in,
            "check_out": check_out
        }))
        .unwrap()
    }

    #[test]
    fn clocked_in_requires_open_interval() {
        let open = record("2024-10-15", Some("09:00:00"), None);
        let closed = record("2024-10-15", Some("09:00:00"), Some("17:30:00"));
        assert!(is_clocked_in(Some(&open)));
        assert!(!is_clocked_in(Some(&closed)));
        assert!(!is_clocked_in(None));
    }

    #[test]
    fn today_record_matches_by_date() {
        let records = vec![
            record("2024-10-14", Some("09:00:00"), Some("17:00:00")),
            record("2024-10-15", Some("09:05:00"), None),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 10, 15).unwrap();
        assert!(today_record(&records, today).is_some());
        let other = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        assert!(today_record(&records, other).is_none());
    }

    #[test]
    fn format_time_is_hh_mm() {
        let time = NaiveTime::from_hms_opt(9, 5, 33).unwrap();
        assert_eq!(format_time(time), "09:05");
    }
}
