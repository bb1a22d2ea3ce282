use std::rc::Rc;

use chrono::NaiveDate;

use crate::api::{
    ApiClient, ApiError, AttendanceRecord, AttendanceSummary, CheckInPayload, CheckOutPayload,
    CsvExport,
};
use crate::utils::time::{now_in_app_tz, today_in_app_tz};

#[derive(Clone)]
pub struct AttendanceRepository {
    api: Rc<ApiClient>,
}

impl AttendanceRepository {
    pub fn new_with_client(api: Rc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn fetch_range(
        &self,
        employee_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        self.api.list_attendance(Some(employee_id), from, to).await
    }

    pub async fn check_in(&self, employee_id: &str) -> Result<AttendanceRecord, ApiError> {
        let now = now_in_app_tz();
        self.api
            .check_in(&CheckInPayload {
                employee_id: employee_id.to_string(),
                date: today_in_app_tz(),
                check_in: now.time(),
            })
            .await
    }

    pub async fn check_out(&self, employee_id: &str) -> Result<AttendanceRecord, ApiError> {
        let now = now_in_app_tz();
        self.api
            .check_out(&CheckOutPayload {
                employee_id: employee_id.to_string(),
                date: today_in_app_tz(),
                check_out: now.time(),
            })
            .await
    }

    pub async fn summary(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> Result<AttendanceSummary, ApiError> {
        self.api.attendance_summary(employee_id, year, month).await
    }

    pub async fn export_csv(
        &self,
        employee_id: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<CsvExport, ApiError> {
        self.api.export_attendance(Some(employee_id), from, to).await
    }
}
