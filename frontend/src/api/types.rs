use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use leptos::{IntoView, View};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts string or numeric ids from the backend and normalizes to `String`.
/// Some deployments key entities numerically while seed data uses strings;
/// this is the one place that difference is absorbed.
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(scalar_to_string).filter(|s| !s.is_empty()))
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A related entity that arrives either as a bare name string or as an
/// embedded object (`{id, name}` / `{id, title}`).
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct NameRef {
    pub id: Option<String>,
    pub name: String,
}

impl<'de> Deserialize<'de> for NameRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(name) => NameRef { id: None, name },
            Value::Object(map) => {
                let id = map
                    .get("id")
                    .map(scalar_to_string)
                    .filter(|s| !s.is_empty());
                let name = map
                    .get("name")
                    .or_else(|| map.get("title"))
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                NameRef { id, name }
            }
            other => NameRef {
                id: None,
                name: scalar_to_string(&other),
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Manager,
    Employee,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Employee => "employee",
            Role::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<NameRef>,
    #[serde(default)]
    pub position: Option<NameRef>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default, alias = "employment_status")]
    pub status: Option<String>,
    #[serde(default, alias = "hireDate")]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeResponse {
    /// Display name precedence: explicit first/last pair, then the legacy
    /// single `name` field, then "Unknown" (rendering must never fail on a
    /// missing employee).
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) if !first.is_empty() => format!("{first} {last}"),
            _ => self
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn department_name(&self) -> Option<&str> {
        self.department
            .as_ref()
            .map(|d| d.name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn position_title(&self) -> Option<&str> {
        self.position
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.eq_ignore_ascii_case("active"))
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentResponse {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "count")]
    pub employee_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionResponse {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department: Option<NameRef>,
    #[serde(default, alias = "minSalary")]
    pub min_salary: Option<f64>,
    #[serde(default, alias = "maxSalary")]
    pub max_salary: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "employeeId", deserialize_with = "de_id")]
    pub employee_id: String,
    pub date: NaiveDate,
    #[serde(default, alias = "checkIn")]
    pub check_in: Option<NaiveTime>,
    #[serde(default, alias = "checkOut")]
    pub check_out: Option<NaiveTime>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "work_hours")]
    pub total_hours: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInPayload {
    pub employee_id: String,
    pub date: NaiveDate,
    pub check_in: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutPayload {
    pub employee_id: String,
    pub date: NaiveDate,
    pub check_out: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub present_days: i64,
    #[serde(default)]
    pub late_days: i64,
    #[serde(default)]
    pub absent_days: i64,
    #[serde(default)]
    pub total_work_hours: f64,
    #[serde(default)]
    pub average_daily_hours: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvExport {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub csv_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaveType {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "maxDays")]
    pub max_days: i64,
    #[serde(default, alias = "advanceNoticeDays")]
    pub advance_notice_days: i64,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected are terminal; only pending requests may move.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    Approve,
    Reject,
}

impl LeaveDecision {
    pub fn status(&self) -> LeaveStatus {
        match self {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        }
    }

    /// Wire value for `POST /leaves/bulk-action`.
    pub fn action_str(&self) -> &'static str {
        match self {
            LeaveDecision::Approve => "approve",
            LeaveDecision::Reject => "reject",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestResponse {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(alias = "employeeId", deserialize_with = "de_id")]
    pub employee_id: String,
    #[serde(default, alias = "type", alias = "leaveTypeId", deserialize_with = "de_opt_id")]
    pub leave_type_id: Option<String>,
    #[serde(default)]
    pub leave_type: Option<LeaveType>,
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
    #[serde(alias = "endDate")]
    pub end_date: NaiveDate,
    #[serde(default, alias = "days")]
    pub total_days: Option<i64>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub emergency_contact: Option<String>,
    #[serde(default, alias = "contact_info")]
    pub handover_notes: Option<String>,
    pub status: LeaveStatus,
    #[serde(alias = "appliedDate")]
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default, alias = "approvedDate")]
    pub approved_date: Option<NaiveDate>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

impl LeaveRequestResponse {
    /// Key used for catalog lookups; prefers the explicit id and falls back
    /// to the embedded type object.
    pub fn type_key(&self) -> &str {
        self.leave_type_id
            .as_deref()
            .or_else(|| self.leave_type.as_ref().map(|t| t.id.as_str()))
            .unwrap_or("")
    }

    /// Inclusive day count; the stored value wins, otherwise derived from
    /// the date range.
    pub fn duration_days(&self) -> i64 {
        self.total_days
            .unwrap_or_else(|| (self.end_date - self.start_date).num_days() + 1)
    }

    /// Whether `date` falls inside the inclusive `[start_date, end_date]`
    /// range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeavePayload {
    pub employee_id: String,
    #[serde(rename = "type")]
    pub leave_type_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handover_notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagedLeaves {
    #[serde(default)]
    pub leaves: Vec<LeaveRequestResponse>,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaveStatistics {
    #[serde(default)]
    pub total_requests: i64,
    #[serde(default)]
    pub pending_count: i64,
    #[serde(default)]
    pub approved_count: i64,
    #[serde(default)]
    pub rejected_count: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LeaveBalanceEntry {
    #[serde(default)]
    pub allocated: f64,
    #[serde(default)]
    pub used: f64,
    #[serde(default)]
    pub pending: f64,
    #[serde(default)]
    pub remaining: f64,
}

impl LeaveBalanceEntry {
    /// Remaining days for display, floored at zero.
    pub fn remaining_clamped(&self) -> f64 {
        self.remaining.max(0.0)
    }

    pub fn usage_fraction(&self) -> f64 {
        if self.allocated > 0.0 {
            (self.used / self.allocated).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveBalance {
    #[serde(default, alias = "employeeId", deserialize_with = "de_opt_id")]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub leave_types: BTreeMap<String, LeaveBalanceEntry>,
    #[serde(default)]
    pub total_days: Option<LeaveBalanceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkActionResult {
    #[serde(alias = "leave_id", deserialize_with = "de_id")]
    pub id: String,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkActionResponse {
    #[serde(default)]
    pub results: Vec<BulkActionResult>,
}

impl BulkActionResponse {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// Spec'd error taxonomy; `Unknown` absorbs any backend code this client
/// does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "VALIDATION_ERROR")]
    Validation,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "INVALID_TRANSITION")]
    InvalidTransition,
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired,
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    #[serde(rename = "UNKNOWN")]
    #[serde(other)]
    Unknown,
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::Unknown
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    #[serde(alias = "message")]
    pub error: String,
    #[serde(default)]
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code,
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Validation, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::NotFound, msg)
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::InvalidTransition, msg)
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Network, msg)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(ErrorCode::Unknown, msg)
    }

    /// Fills in a taxonomy code from the HTTP status when the backend body
    /// did not carry a recognized one.
    pub fn classified_by_status(mut self, status: u16) -> Self {
        if self.code == ErrorCode::Unknown {
            self.code = match status {
                400 | 422 => ErrorCode::Validation,
                401 => ErrorCode::AuthExpired,
                404 => ErrorCode::NotFound,
                409 => ErrorCode::InvalidTransition,
                _ => ErrorCode::Unknown,
            };
        }
        self
    }
}
