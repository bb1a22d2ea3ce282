use std::rc::Rc;

use chrono::NaiveDate;

use super::utils::{validate_decision, LeaveFilterSnapshot};
use crate::api::{
    ApiClient, ApiError, BulkActionResponse, CreateLeavePayload, LeaveBalance, LeaveDecision,
    LeaveRequestResponse, LeaveStatistics, LeaveStatus, PagedLeaves,
};
use crate::state::leave_catalog::LeaveCatalog;

/// The session's source of truth for leave requests: filtered/paginated
/// retrieval, creation, status transitions (single and bulk), statistics,
/// balance and calendar projections. Mutators are `create`, `decide`,
/// `bulk_decide` and `cancel`; everything else is a read-only projection.
#[derive(Clone)]
pub struct LeaveRepository {
    api: Rc<ApiClient>,
}

impl LeaveRepository {
    pub fn new_with_client(api: Rc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn fetch_page(&self, snapshot: &LeaveFilterSnapshot) -> Result<PagedLeaves, ApiError> {
        self.api.list_leaves(&snapshot.to_query()).await
    }

    pub async fn create(
        &self,
        payload: &CreateLeavePayload,
    ) -> Result<LeaveRequestResponse, ApiError> {
        self.api.create_leave(payload).await
    }

    /// Applies a reviewer decision to a single request. The workflow-layer
    /// validation runs first: a terminal request or a comment-less
    /// rejection never reaches the backend.
    pub async fn decide(
        &self,
        current_status: LeaveStatus,
        id: &str,
        decision: LeaveDecision,
        comments: &str,
    ) -> Result<LeaveRequestResponse, ApiError> {
        validate_decision(current_status, decision, comments)?;
        self.api.set_leave_status(id, decision, comments).await
    }

    /// Per-id outcomes; one failing id does not roll back the others.
    pub async fn bulk_decide(
        &self,
        decision: LeaveDecision,
        ids: &[String],
        comments: &str,
    ) -> Result<BulkActionResponse, ApiError> {
        if ids.is_empty() {
            return Err(ApiError::validation("Please select leave requests first."));
        }
        if decision == LeaveDecision::Reject && comments.trim().is_empty() {
            return Err(ApiError::validation(
                "Please provide a reason for the rejection.",
            ));
        }
        self.api.bulk_leave_action(decision, ids, comments).await
    }

    pub async fn statistics(&self, year: i32) -> Result<LeaveStatistics, ApiError> {
        self.api.leave_statistics(Some(year), None, None, None).await
    }

    pub async fn balance(
        &self,
        employee_id: &str,
        year: Option<i32>,
    ) -> Result<LeaveBalance, ApiError> {
        self.api.leave_balance(employee_id, year).await
    }

    /// Approved requests overlapping the visible range; the calendar never
    /// shows pending or rejected entries.
    pub async fn calendar(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        let records = self.api.leave_calendar(start, end, None, None).await?;
        Ok(records
            .into_iter()
            .filter(|record| record.status == LeaveStatus::Approved)
            .collect())
    }

    /// Loaded once per session; an empty or failing catalog endpoint falls
    /// back to the built-in types the original deployment ships.
    pub async fn catalog(&self) -> LeaveCatalog {
        match self.api.leave_types().await {
            Ok(types) if !types.is_empty() => LeaveCatalog::new(types),
            Ok(_) => LeaveCatalog::builtin(),
            Err(err) => {
                log::warn!("Failed to load leave types, using built-ins: {err}");
                LeaveCatalog::builtin()
            }
        }
    }

    pub async fn cancel(&self, id: &str) -> Result<(), ApiError> {
        self.api.cancel_leave(id).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::api::ErrorCode;
    use serde_json::json;

    fn repository(server: &MockServer) -> LeaveRepository {
        LeaveRepository::new_with_client(Rc::new(ApiClient::new_with_base_url(
            server.url("/api"),
        )))
    }

    #[tokio::test]
    async fn rejecting_without_comment_never_calls_the_store() {
        // No route is mocked: a dispatched request would fail loudly.
        let server = MockServer::start();
        let repo = repository(&server);
        let err = repo
            .decide(LeaveStatus::Pending, "1", LeaveDecision::Reject, "")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn deciding_a_terminal_request_fails_locally() {
        let server = MockServer::start();
        let repo = repository(&server);
        let err = repo
            .decide(LeaveStatus::Approved, "1", LeaveDecision::Approve, "")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[tokio::test]
    async fn bulk_decide_requires_a_selection() {
        let server = MockServer::start();
        let repo = repository(&server);
        let err = repo
            .bulk_decide(LeaveDecision::Approve, &[], "")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn calendar_projection_drops_non_approved_records() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/leaves/calendar");
            then.status(200).json_body(json!([
                {
                    "id": "1", "employee_id": "3", "type": "vacation",
                    "start_date": "2024-10-15", "end_date": "2024-10-19",
                    "status": "approved", "applied_date": "2024-09-25", "reason": "ok"
                },
                {
                    "id": "2", "employee_id": "4", "type": "sick",
                    "start_date": "2024-10-16", "end_date": "2024-10-16",
                    "status": "pending", "applied_date": "2024-10-01", "reason": "flu"
                },
                {
                    "id": "3", "employee_id": "5", "type": "personal",
                    "start_date": "2024-10-17", "end_date": "2024-10-17",
                    "status": "rejected", "applied_date": "2024-10-02", "reason": "no"
                }
            ]));
        });

        let repo = repository(&server);
        let visible = repo
            .calendar(
                NaiveDate::from_ymd_opt(2024, 9, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 11, 9).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].status, LeaveStatus::Approved);
    }

    #[tokio::test]
    async fn catalog_falls_back_to_builtin_on_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/leaves/types");
            then.status(500).json_body(json!({"message": "boom"}));
        });

        let repo = repository(&server);
        let catalog = repo.catalog().await;
        assert!(!catalog.is_empty());
        assert_eq!(catalog.name_of("vacation"), "Vacation");
    }

    #[tokio::test]
    async fn bulk_decide_surfaces_partial_outcomes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/leaves/bulk-action");
            then.status(200).json_body(json!({
                "results": [
                    {"id": "1", "success": true},
                    {"id": "2", "success": false, "error": "Leave request is not pending"},
                    {"id": "3", "success": true}
                ]
            }));
        });

        let repo = repository(&server);
        let ids: Vec<String> = vec!["1".into(), "2".into(), "3".into()];
        let outcome = repo
            .bulk_decide(LeaveDecision::Approve, &ids, "batch")
            .await
            .unwrap();
        assert_eq!(outcome.succeeded(), 2);
        assert_eq!(outcome.failed(), 1);
    }
}
