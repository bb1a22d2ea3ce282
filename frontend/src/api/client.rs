use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    api::types::{ApiError, LoginResponse},
    config,
    utils::{nav, storage},
};

/// The one gateway to the HR backend. Every feature area adds its endpoint
/// wrappers in its own `impl ApiClient` block (see the sibling modules);
/// this file owns base-URL resolution, bearer auth, dispatch, response
/// mapping and expired-session handling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    pub(super) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Builds an authorized request for `path` relative to the base URL.
    pub(super) async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let base_url = self.resolved_base_url().await;
        let mut builder = self.client.request(method, format!("{base_url}{path}"));
        if let Some(token) = storage::auth_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    pub(super) async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::network(format!("Invalid request: {e}")))?;

        #[cfg(all(test, not(target_arch = "wasm32")))]
        if let Some(responder) = mock::responder_for(request.url().as_str()) {
            return responder.respond(&request).map(mock::MockResponse::into_response);
        }

        self.client.execute(request).await.map_err(|e| {
            log::warn!("Request failed: {e}");
            ApiError::network("Network error. Please check your connection and try again.")
        })
    }

    /// Session expiry is handled globally: drop the stored session and send
    /// the user back to the login screen, bypassing per-call error display.
    pub(super) fn handle_unauthorized_status(status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("Session expired, redirecting to login");
            Self::clear_auth_session();
            if nav::current_path().as_deref() != Some("/login") {
                nav::redirect_to("/login");
            }
        }
    }

    pub(crate) fn clear_auth_session() {
        storage::clear_auth_token();
        storage::remove_item(storage::CURRENT_USER_KEY);
    }

    pub(crate) fn persist_session(response: &LoginResponse) -> Result<(), ApiError> {
        storage::set_auth_token(&response.token)
            .map_err(|_| ApiError::unknown("Failed to store token"))?;
        let user_json = serde_json::to_string(&response.user)
            .map_err(|_| ApiError::unknown("Failed to serialize user profile"))?;
        storage::set_item(storage::CURRENT_USER_KEY, &user_json)
            .map_err(|_| ApiError::unknown("Failed to store user profile"))?;
        Ok(())
    }

    pub(super) async fn map_json_response<T>(&self, response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {e}")))
        } else {
            let error = response
                .json::<ApiError>()
                .await
                .unwrap_or_else(|_| ApiError::unknown("An error occurred"));
            Err(error.classified_by_status(status.as_u16()))
        }
    }

    pub(super) async fn map_empty_response(&self, response: Response) -> Result<(), ApiError> {
        let status = response.status();
        Self::handle_unauthorized_status(status);
        if status.is_success() {
            Ok(())
        } else {
            let error = response
                .json::<ApiError>()
                .await
                .unwrap_or_else(|_| ApiError::unknown("An error occurred"));
            Err(error.classified_by_status(status.as_u16()))
        }
    }
}

/// Host-test request interception. `MockServer` (api::test_support)
/// registers itself here per fabricated base URL; `dispatch` consults the
/// registry before touching the network.
#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod mock {
    use std::sync::{Arc, Mutex, OnceLock};

    use crate::api::types::ApiError;

    pub trait TestResponder: Send + Sync {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError>;
    }

    #[derive(Clone)]
    pub struct MockResponse {
        status: u16,
        body: serde_json::Value,
    }

    impl MockResponse {
        pub fn json(status: u16, body: serde_json::Value) -> Self {
            Self { status, body }
        }

        pub(crate) fn into_response(self) -> reqwest::Response {
            let http_response = http::Response::builder()
                .status(self.status)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(self.body.to_string())
                .expect("mock response");
            reqwest::Response::from(http_response)
        }
    }

    fn registry() -> &'static Mutex<Vec<(String, Arc<dyn TestResponder>)>> {
        static REGISTRY: OnceLock<Mutex<Vec<(String, Arc<dyn TestResponder>)>>> = OnceLock::new();
        REGISTRY.get_or_init(|| Mutex::new(Vec::new()))
    }

    pub fn register_mock(base_url: String, responder: Arc<dyn TestResponder>) {
        let mut entries = registry().lock().expect("mock registry lock");
        entries.retain(|(base, _)| base != &base_url);
        entries.push((base_url, responder));
    }

    pub(crate) fn responder_for(url: &str) -> Option<Arc<dyn TestResponder>> {
        let entries = registry().lock().ok()?;
        entries
            .iter()
            .rev()
            .find(|(base, _)| url.starts_with(base.as_str()))
            .map(|(_, responder)| responder.clone())
    }
}
