use chrono::NaiveDate;
use reqwest::Method;

use super::{
    client::ApiClient,
    types::{
        ApiError, AttendanceRecord, AttendanceSummary, CheckInPayload, CheckOutPayload, CsvExport,
    },
};

fn range_params(
    employee_id: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(employee_id) = employee_id.filter(|e| !e.is_empty()) {
        params.push(("employee_id", employee_id.to_string()));
    }
    if let Some(from) = from {
        params.push(("start_date", from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = to {
        params.push(("end_date", to.format("%Y-%m-%d").to_string()));
    }
    params
}

impl ApiClient {
    pub async fn check_in(&self, payload: &CheckInPayload) -> Result<AttendanceRecord, ApiError> {
        let builder = self
            .request(Method::POST, "/attendance/check-in")
            .await
            .json(payload);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn check_out(&self, payload: &CheckOutPayload) -> Result<AttendanceRecord, ApiError> {
        let builder = self
            .request(Method::POST, "/attendance/check-out")
            .await
            .json(payload);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn list_attendance(
        &self,
        employee_id: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let params = range_params(employee_id, from, to);
        let mut builder = self.request(Method::GET, "/attendance").await;
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn attendance_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> Result<AttendanceSummary, ApiError> {
        let builder = self
            .request(Method::GET, &format!("/attendance/summary/{employee_id}"))
            .await
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn export_attendance(
        &self,
        employee_id: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<CsvExport, ApiError> {
        let params = range_params(employee_id, from, to);
        let mut builder = self.request(Method::GET, "/attendance/export").await;
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }
}
