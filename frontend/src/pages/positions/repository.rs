use std::rc::Rc;

use crate::api::{ApiClient, ApiError, DepartmentResponse, PositionPayload, PositionResponse};

#[derive(Clone)]
pub struct PositionRepository {
    api: Rc<ApiClient>,
}

impl PositionRepository {
    pub fn new_with_client(api: Rc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn positions(&self) -> Result<Vec<PositionResponse>, ApiError> {
        self.api.list_positions().await
    }

    pub async fn departments(&self) -> Result<Vec<DepartmentResponse>, ApiError> {
        self.api.list_departments().await
    }

    pub async fn create(&self, payload: &PositionPayload) -> Result<PositionResponse, ApiError> {
        self.api.create_position(payload).await
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete_position(id).await
    }
}
