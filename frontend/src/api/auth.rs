use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, UserResponse},
};

impl ApiClient {
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let builder = self.request(Method::POST, "/auth/login").await.json(&request);
        let response = self.dispatch(builder).await?;
        let login_response: LoginResponse = self.map_json_response(response).await?;
        Self::persist_session(&login_response)?;
        Ok(login_response)
    }

    pub async fn get_profile(&self) -> Result<UserResponse, ApiError> {
        let builder = self.request(Method::GET, "/auth/profile").await;
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }

    /// Local session state is dropped even when the backend call fails;
    /// logout must always leave the client signed out.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/auth/logout").await;
        let result = match self.dispatch(builder).await {
            Ok(response) => self.map_empty_response(response).await,
            Err(err) => Err(err),
        };
        Self::clear_auth_session();
        result
    }

    pub async fn change_password(
        &self,
        request: ChangePasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        let builder = self
            .request(Method::PUT, "/auth/change-password")
            .await
            .json(&request);
        let response = self.dispatch(builder).await?;
        self.map_json_response(response).await
    }
}
