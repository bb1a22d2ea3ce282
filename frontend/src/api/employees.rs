use reqwest::Method;

use super::{
    client::ApiClient,
    types::{
        ApiError, DepartmentResponse, EmployeePayload, EmployeeResponse, PositionPayload,
        PositionResponse,
    },
};

fn employee_params(
    search: Option<&str>,
    department_id: Option<&str>,
    status: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(search) = search.filter(|s| !s.is_empty()) {
        params.push(("search", search.to_string()));
    }
    if let Some(department_id) = department_id.filter(|d| !d.is_empty()) {
        params.push(("department_id", department_id.to_string()));
    }
    if let Some(status) = status.filter(|s| !s.is_empty()) {
        params.push(("status", status.to_string()));
    }
    params
}

impl ApiClient {
    pub async fn list_employees(
        &self,
        search: Option<&str>,
        department_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<EmployeeResponse>, ApiError> {
        let params = employee_params(search, department_id, status);
        let mut builder = self.request(Method::GET, "/employees").await;
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn create_employee(
        &self,
        payload: &EmployeePayload,
    ) -> Result<EmployeeResponse, ApiError> {
        let builder = self.request(Method::POST, "/employees").await.json(payload);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn update_employee(
        &self,
        id: &str,
        payload: &EmployeePayload,
    ) -> Result<EmployeeResponse, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/employees/{id}"))
            .await
            .json(payload);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/employees/{id}")).await;
        let response = self.dispatch(builder).await?;
        self.map_empty_response(response).await
    }

    pub async fn list_departments(&self) -> Result<Vec<DepartmentResponse>, ApiError> {
        let builder = self.request(Method::GET, "/departments").await;
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn list_positions(&self) -> Result<Vec<PositionResponse>, ApiError> {
        let builder = self.request(Method::GET, "/positions").await;
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn create_position(
        &self,
        payload: &PositionPayload,
    ) -> Result<PositionResponse, ApiError> {
        let builder = self.request(Method::POST, "/positions").await.json(payload);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    pub async fn delete_position(&self, id: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, &format!("/positions/{id}")).await;
        let response = self.dispatch(builder).await?;
        self.map_empty_response(response).await
    }
}
