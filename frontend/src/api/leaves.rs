use chrono::NaiveDate;
use reqwest::Method;
use serde_json::json;

use super::{
    client::ApiClient,
    types::{
        ApiError, BulkActionResponse, CreateLeavePayload, LeaveBalance, LeaveDecision,
        LeaveRequestResponse, LeaveStatistics, LeaveStatus, LeaveType, PagedLeaves,
    },
};

/// Query for `GET /leaves`. Unset fields impose no constraint; pagination
/// is 1-indexed. Building the parameter list from a plain struct keeps the
/// effective filter independent of the order fields were set in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveListQuery {
    pub status: Option<LeaveStatus>,
    pub leave_type: Option<String>,
    pub employee_id: Option<String>,
    pub department_id: Option<String>,
    pub search: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl LeaveListQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(leave_type) = self.leave_type.as_deref().filter(|t| !t.is_empty()) {
            params.push(("type", leave_type.to_string()));
        }
        if let Some(employee_id) = self.employee_id.as_deref().filter(|e| !e.is_empty()) {
            params.push(("employee_id", employee_id.to_string()));
        }
        if let Some(department_id) = self.department_id.as_deref().filter(|d| !d.is_empty()) {
            params.push(("department_id", department_id.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.trim().to_string()));
        }
        if let Some(start) = self.start_date {
            params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

fn scope_params(
    employee_id: Option<&str>,
    department_id: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(employee_id) = employee_id.filter(|e| !e.is_empty()) {
        params.push(("employee_id", employee_id.to_string()));
    }
    if let Some(department_id) = department_id.filter(|d| !d.is_empty()) {
        params.push(("department_id", department_id.to_string()));
    }
    params
}

impl ApiClient {
    pub async fn list_leaves(&self, query: &LeaveListQuery) -> Result<PagedLeaves, ApiError> {
        let params = query.to_params();
        let mut builder = self.request(Method::GET, "/leaves").await;
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn create_leave(
        &self,
        payload: &CreateLeavePayload,
    ) -> Result<LeaveRequestResponse, ApiError> {
        let builder = self.request(Method::POST, "/leaves").await.json(payload);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn set_leave_status(
        &self,
        id: &str,
        decision: LeaveDecision,
        comments: &str,
    ) -> Result<LeaveRequestResponse, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/leaves/{id}/status"))
            .await
            .json(&json!({
                "status": decision.status().as_str(),
                "comments": comments,
            }));
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn bulk_leave_action(
        &self,
        decision: LeaveDecision,
        leave_ids: &[String],
        comments: &str,
    ) -> Result<BulkActionResponse, ApiError> {
        let builder = self
            .request(Method::POST, "/leaves/bulk-action")
            .await
            .json(&json!({
                "action": decision.action_str(),
                "leave_ids": leave_ids,
                "comments": comments,
            }));
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn leave_types(&self) -> Result<Vec<LeaveType>, ApiError> {
        let builder = self.request(Method::GET, "/leaves/types").await;
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn leave_statistics(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        employee_id: Option<&str>,
        department_id: Option<&str>,
    ) -> Result<LeaveStatistics, ApiError> {
        let mut params = scope_params(employee_id, department_id);
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        if let Some(month) = month {
            params.push(("month", month.to_string()));
        }
        let mut builder = self.request(Method::GET, "/leaves/statistics").await;
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn leave_balance(
        &self,
        employee_id: &str,
        year: Option<i32>,
    ) -> Result<LeaveBalance, ApiError> {
        let mut builder = self
            .request(Method::GET, &format!("/leaves/balance/{employee_id}"))
            .await;
        if let Some(year) = year {
            builder = builder.query(&[("year", year.to_string())]);
        }
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn leave_calendar(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        employee_id: Option<&str>,
        department_id: Option<&str>,
    ) -> Result<Vec<LeaveRequestResponse>, ApiError> {
        let mut params = vec![
            ("start_date", start_date.format("%Y-%m-%d").to_string()),
            ("end_date", end_date.format("%Y-%m-%d").to_string()),
        ];
        params.extend(scope_params(employee_id, department_id));
        let builder = self
            .request(Method::GET, "/leaves/calendar")
            .await
            .query(&params);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    /// Cancels one of the caller's own still-pending requests.
    pub async fn cancel_leave(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/leaves/{id}")).await;
        let response = self.dispatch(builder).await?;
        self.map_empty_response(response).await
    }
}
