use std::rc::Rc;

use crate::api::{
    ApiClient, ApiError, DepartmentResponse, EmployeePayload, EmployeeResponse, PositionResponse,
};

#[derive(Clone)]
pub struct EmployeeRepository {
    api: Rc<ApiClient>,
}

impl EmployeeRepository {
    pub fn new_with_client(api: Rc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn fetch(
        &self,
        search: Option<&str>,
        department_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<EmployeeResponse>, ApiError> {
        self.api.list_employees(search, department_id, status).await
    }

    pub async fn save(
        &self,
        id: Option<&str>,
        payload: &EmployeePayload,
    ) -> Result<EmployeeResponse, ApiError> {
        match id {
            Some(id) => self.api.update_employee(id, payload).await,
            None => self.api.create_employee(payload).await,
        }
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete_employee(id).await
    }

    pub async fn departments(&self) -> Result<Vec<DepartmentResponse>, ApiError> {
        self.api.list_departments().await
    }

    pub async fn positions(&self) -> Result<Vec<PositionResponse>, ApiError> {
        self.api.list_positions().await
    }
}
