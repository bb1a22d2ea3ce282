use chrono::{Datelike, Duration, NaiveDate};
use leptos::*;

use crate::api::{
    ApiError, CreateLeavePayload, LeaveDecision, LeaveListQuery, LeaveStatus,
};
use crate::state::leave_catalog::LeaveCatalog;
use crate::utils::time::parse_date_input;

pub const PAGE_SIZE: u32 = 10;
pub const CALENDAR_CELLS: usize = 42;

/// Inclusive day count between two calendar dates. Weekends count; the
/// original seed data and the calendar rendering both treat a Monday-to-
/// Friday request as five days.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// The 6x7 grid for a month view: 42 consecutive days beginning with the
/// Sunday on or before the 1st.
pub fn calendar_grid(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_sunday() as i64;
    let grid_start = first - Duration::days(offset);
    (0..CALENDAR_CELLS as i64)
        .map(|i| grid_start + Duration::days(i))
        .collect()
}

pub fn month_title(year: i32, month: u32) -> String {
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    let name = MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    format!("{name} {year}")
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Name for an employee id out of the loaded directory; rendering falls
/// back to "Unknown" rather than failing on a missing record.
pub fn employee_display_name(employees: &[crate::api::EmployeeResponse], id: &str) -> String {
    employees
        .iter()
        .find(|employee| employee.id == id)
        .map(|employee| employee.display_name())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Workflow-layer gate for a single approve/reject. The store is never
/// called when this fails: decisions are only valid on pending requests,
/// and a rejection must carry a comment.
pub fn validate_decision(
    current: LeaveStatus,
    decision: LeaveDecision,
    comments: &str,
) -> Result<(), ApiError> {
    if current.is_terminal() {
        return Err(ApiError::invalid_transition(format!(
            "Leave request is already {current}"
        )));
    }
    if decision == LeaveDecision::Reject && comments.trim().is_empty() {
        return Err(ApiError::validation(
            "Please provide a reason for the rejection.",
        ));
    }
    Ok(())
}

/// Everything the requests tab filters on, except the page cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveFilterCriteria {
    pub status: Option<LeaveStatus>,
    pub leave_type: Option<String>,
    pub employee_id: Option<String>,
    pub department_id: Option<String>,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveFilterSnapshot {
    pub criteria: LeaveFilterCriteria,
    pub page: u32,
    pub per_page: u32,
}

impl LeaveFilterSnapshot {
    pub fn to_query(&self) -> LeaveListQuery {
        LeaveListQuery {
            status: self.criteria.status,
            leave_type: self.criteria.leave_type.clone(),
            employee_id: self.criteria.employee_id.clone(),
            department_id: self.criteria.department_id.clone(),
            search: self.criteria.search.clone(),
            start_date: self.criteria.start_date,
            end_date: self.criteria.end_date,
            page: Some(self.page),
            limit: Some(self.per_page),
        }
    }
}

#[derive(Clone, Copy)]
pub struct LeaveFilterState {
    status: RwSignal<String>,
    leave_type: RwSignal<String>,
    employee_id: RwSignal<String>,
    department_id: RwSignal<String>,
    search: RwSignal<String>,
    range_start: RwSignal<String>,
    range_end: RwSignal<String>,
    page: RwSignal<u32>,
    per_page: u32,
}

impl LeaveFilterState {
    pub fn new() -> Self {
        Self {
            status: create_rw_signal(String::new()),
            leave_type: create_rw_signal(String::new()),
            employee_id: create_rw_signal(String::new()),
            department_id: create_rw_signal(String::new()),
            search: create_rw_signal(String::new()),
            range_start: create_rw_signal(String::new()),
            range_end: create_rw_signal(String::new()),
            page: create_rw_signal(1),
            per_page: PAGE_SIZE,
        }
    }

    pub fn status_signal(&self) -> RwSignal<String> {
        self.status
    }

    pub fn type_signal(&self) -> RwSignal<String> {
        self.leave_type
    }

    pub fn employee_signal(&self) -> RwSignal<String> {
        self.employee_id
    }

    pub fn department_signal(&self) -> RwSignal<String> {
        self.department_id
    }

    pub fn range_start_signal(&self) -> RwSignal<String> {
        self.range_start
    }

    pub fn range_end_signal(&self) -> RwSignal<String> {
        self.range_end
    }

    pub fn set_search(&self, value: String) {
        self.search.set(value);
        self.reset_page();
    }

    pub fn page(&self) -> u32 {
        self.page.get_untracked()
    }

    pub fn set_page(&self, page: u32) {
        self.page.set(page.max(1));
    }

    pub fn reset_page(&self) {
        self.page.set(1);
    }

    fn non_empty(signal: RwSignal<String>) -> Option<String> {
        let value = signal.get();
        if value.trim().is_empty() {
            None
        } else {
            Some(value.trim().to_string())
        }
    }

    /// The effective filter is a plain value; it does not depend on the
    /// order the individual fields were set in.
    pub fn criteria(&self) -> LeaveFilterCriteria {
        LeaveFilterCriteria {
            status: Self::non_empty(self.status).and_then(|raw| LeaveStatus::parse(&raw)),
            leave_type: Self::non_empty(self.leave_type),
            employee_id: Self::non_empty(self.employee_id),
            department_id: Self::non_empty(self.department_id),
            search: Self::non_empty(self.search),
            start_date: Self::non_empty(self.range_start).and_then(|raw| parse_date_input(&raw)),
            end_date: Self::non_empty(self.range_end).and_then(|raw| parse_date_input(&raw)),
        }
    }

    pub fn snapshot(&self) -> LeaveFilterSnapshot {
        LeaveFilterSnapshot {
            criteria: self.criteria(),
            page: self.page.get(),
            per_page: self.per_page,
        }
    }
}

/// Form state for the request modal. Validation happens in `to_payload`;
/// the store only ever sees well-formed drafts.
#[derive(Clone, Copy)]
pub struct LeaveFormState {
    pub employee_id: RwSignal<String>,
    pub leave_type_id: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
    pub reason: RwSignal<String>,
    pub emergency_contact: RwSignal<String>,
    pub handover_notes: RwSignal<String>,
}

impl LeaveFormState {
    pub fn new() -> Self {
        Self {
            employee_id: create_rw_signal(String::new()),
            leave_type_id: create_rw_signal(String::new()),
            start_date: create_rw_signal(String::new()),
            end_date: create_rw_signal(String::new()),
            reason: create_rw_signal(String::new()),
            emergency_contact: create_rw_signal(String::new()),
            handover_notes: create_rw_signal(String::new()),
        }
    }

    pub fn reset(&self) {
        self.employee_id.set(String::new());
        self.leave_type_id.set(String::new());
        self.start_date.set(String::new());
        self.end_date.set(String::new());
        self.reason.set(String::new());
        self.emergency_contact.set(String::new());
        self.handover_notes.set(String::new());
    }

    pub fn to_payload(
        &self,
        catalog: &LeaveCatalog,
        fallback_employee_id: Option<&str>,
    ) -> Result<CreateLeavePayload, ApiError> {
        let employee_id = {
            let explicit = self.employee_id.get();
            let explicit = explicit.trim();
            if explicit.is_empty() {
                fallback_employee_id
                    .map(|id| id.to_string())
                    .ok_or_else(|| ApiError::validation("Please select an employee."))?
            } else {
                explicit.to_string()
            }
        };

        let leave_type_id = self.leave_type_id.get();
        let leave_type_id = leave_type_id.trim();
        if leave_type_id.is_empty() {
            return Err(ApiError::validation("Please select a leave type."));
        }

        let start_date = parse_date_input(&self.start_date.get())
            .ok_or_else(|| ApiError::validation("Please enter a valid start date."))?;
        let end_date = parse_date_input(&self.end_date.get())
            .ok_or_else(|| ApiError::validation("Please enter a valid end date."))?;
        if end_date < start_date {
            return Err(ApiError::validation(
                "End date must be on or after the start date.",
            ));
        }

        let reason = self.reason.get();
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ApiError::validation(
                "Please provide a reason for the leave request.",
            ));
        }

        let total_days = inclusive_days(start_date, end_date);
        if let Some(max_days) = catalog.max_days_of(leave_type_id) {
            if max_days > 0 && total_days > max_days {
                return Err(ApiError::validation(format!(
                    "{} days exceeds the {} allotment of {} days.",
                    total_days,
                    catalog.name_of(leave_type_id),
                    max_days
                )));
            }
        }

        let optional = |signal: RwSignal<String>| {
            let value = signal.get();
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };

        Ok(CreateLeavePayload {
            employee_id,
            leave_type_id: leave_type_id.to_string(),
            start_date,
            end_date,
            reason: reason.to_string(),
            emergency_contact: optional(self.emergency_contact),
            handover_notes: optional(self.handover_notes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn inclusive_days_counts_both_endpoints() {
        assert_eq!(inclusive_days(date(2024, 10, 15), date(2024, 10, 19)), 5);
        assert_eq!(inclusive_days(date(2024, 10, 5), date(2024, 10, 5)), 1);
    }

    #[test]
    fn overlap_test_is_inclusive() {
        assert!(ranges_overlap(
            date(2024, 10, 1),
            date(2024, 10, 5),
            date(2024, 10, 5),
            date(2024, 10, 9)
        ));
        assert!(!ranges_overlap(
            date(2024, 10, 1),
            date(2024, 10, 4),
            date(2024, 10, 5),
            date(2024, 10, 9)
        ));
    }

    #[test]
    fn calendar_grid_is_42_cells_starting_sunday() {
        // October 2024 begins on a Tuesday; the grid opens on Sunday the
        // 29th of September.
        let grid = calendar_grid(2024, 10);
        assert_eq!(grid.len(), CALENDAR_CELLS);
        assert_eq!(grid[0], date(2024, 9, 29));
        assert_eq!(grid[0].weekday(), Weekday::Sun);
        assert_eq!(grid[41], date(2024, 11, 9));
    }

    #[test]
    fn calendar_grid_handles_month_starting_on_sunday() {
        // September 2024 starts on a Sunday; no left padding.
        let grid = calendar_grid(2024, 9);
        assert_eq!(grid[0], date(2024, 9, 1));
    }

    #[test]
    fn calendar_grid_is_deterministic() {
        assert_eq!(calendar_grid(2024, 10), calendar_grid(2024, 10));
    }

    #[test]
    fn month_navigation_wraps_at_year_boundaries() {
        assert_eq!(prev_month(2024, 1), (2023, 12));
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(next_month(2024, 6), (2024, 7));
        assert_eq!(month_title(2024, 10), "October 2024");
    }

    #[test]
    fn unknown_employee_renders_as_unknown() {
        let employees: Vec<crate::api::EmployeeResponse> = vec![serde_json::from_value(
            serde_json::json!({"id": "3", "first_name": "Mike", "last_name": "Employee"}),
        )
        .unwrap()];
        assert_eq!(employee_display_name(&employees, "3"), "Mike Employee");
        assert_eq!(employee_display_name(&employees, "99"), "Unknown");
    }

    #[test]
    fn rejection_without_comment_is_blocked() {
        let err = validate_decision(LeaveStatus::Pending, LeaveDecision::Reject, "  ").unwrap_err();
        assert_eq!(err.code, crate::api::ErrorCode::Validation);
        assert!(validate_decision(LeaveStatus::Pending, LeaveDecision::Reject, "overlap").is_ok());
    }

    #[test]
    fn decisions_on_terminal_requests_are_invalid_transitions() {
        let err =
            validate_decision(LeaveStatus::Approved, LeaveDecision::Approve, "").unwrap_err();
        assert_eq!(err.code, crate::api::ErrorCode::InvalidTransition);
        let err = validate_decision(LeaveStatus::Rejected, LeaveDecision::Reject, "x").unwrap_err();
        assert_eq!(err.code, crate::api::ErrorCode::InvalidTransition);
        assert!(validate_decision(LeaveStatus::Pending, LeaveDecision::Approve, "").is_ok());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn snapshot_is_independent_of_assignment_order() {
        with_runtime(|| {
            let a = LeaveFilterState::new();
            a.status_signal().set("pending".into());
            a.type_signal().set("vacation".into());

            let b = LeaveFilterState::new();
            b.type_signal().set("vacation".into());
            b.status_signal().set("pending".into());

            assert_eq!(a.snapshot(), b.snapshot());
            assert_eq!(a.snapshot().criteria.status, Some(LeaveStatus::Pending));
        });
    }

    #[test]
    fn snapshot_parses_dates_and_skips_blanks() {
        with_runtime(|| {
            let filters = LeaveFilterState::new();
            filters.range_start_signal().set("2024-10-01".into());
            filters.range_end_signal().set("not-a-date".into());
            let snapshot = filters.snapshot();
            assert_eq!(
                snapshot.criteria.start_date,
                NaiveDate::from_ymd_opt(2024, 10, 1)
            );
            assert!(snapshot.criteria.end_date.is_none());
            assert_eq!(snapshot.page, 1);
            assert_eq!(snapshot.per_page, PAGE_SIZE);
        });
    }

    #[test]
    fn query_carries_one_indexed_pagination() {
        with_runtime(|| {
            let filters = LeaveFilterState::new();
            filters.set_page(3);
            let query = filters.snapshot().to_query();
            assert_eq!(query.page, Some(3));
            assert_eq!(query.limit, Some(PAGE_SIZE));
            filters.set_search("holiday".into());
            assert_eq!(filters.snapshot().page, 1);
        });
    }

    #[test]
    fn form_rejects_missing_fields_and_inverted_ranges() {
        with_runtime(|| {
            let catalog = crate::state::leave_catalog::LeaveCatalog::builtin();
            let form = LeaveFormState::new();
            assert!(form.to_payload(&catalog, Some("3")).is_err());

            form.leave_type_id.set("vacation".into());
            form.start_date.set("2024-10-19".into());
            form.end_date.set("2024-10-15".into());
            form.reason.set("Family vacation".into());
            let err = form.to_payload(&catalog, Some("3")).unwrap_err();
            assert_eq!(err.code, crate::api::ErrorCode::Validation);

            form.start_date.set("2024-10-15".into());
            form.end_date.set("2024-10-19".into());
            let payload = form.to_payload(&catalog, Some("3")).unwrap();
            assert_eq!(payload.employee_id, "3");
            assert_eq!(
                inclusive_days(payload.start_date, payload.end_date),
                5
            );
        });
    }

    #[test]
    fn form_blocks_requests_over_the_annual_allotment() {
        with_runtime(|| {
            let catalog = crate::state::leave_catalog::LeaveCatalog::builtin();
            let form = LeaveFormState::new();
            form.leave_type_id.set("personal".into());
            form.start_date.set("2024-10-01".into());
            form.end_date.set("2024-10-10".into());
            form.reason.set("Long break".into());
            let err = form.to_payload(&catalog, Some("3")).unwrap_err();
            assert_eq!(err.code, crate::api::ErrorCode::Validation);
            assert!(err.error.contains("Personal Leave"));
        });
    }

    #[test]
    fn form_reset_clears_every_field() {
        with_runtime(|| {
            let form = LeaveFormState::new();
            form.reason.set("Something".into());
            form.leave_type_id.set("sick".into());
            form.reset();
            assert!(form.reason.get().is_empty());
            assert!(form.leave_type_id.get().is_empty());
        });
    }
}
