use leptos::*;

use crate::{
    api::{ApiClient, ApiError, ChangePasswordRequest, LoginRequest, Role, UserResponse},
    utils::storage,
};

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub loading: bool,
}

/// What a signed-in user is allowed to do. Gating goes through
/// `role_allows` instead of ad-hoc role-string membership checks, so new
/// roles only touch this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageLeaves,
    ViewAllLeaves,
    ManageEmployees,
    ManagePositions,
    ViewReports,
}

pub fn role_allows(role: Role, capability: Capability) -> bool {
    match capability {
        Capability::ManageLeaves => matches!(role, Role::Admin | Role::Hr | Role::Manager),
        Capability::ViewAllLeaves => matches!(role, Role::Admin | Role::Hr),
        Capability::ManageEmployees => matches!(role, Role::Admin | Role::Hr),
        Capability::ManagePositions => matches!(role, Role::Admin | Role::Hr),
        Capability::ViewReports => matches!(role, Role::Admin | Role::Hr | Role::Manager),
    }
}

pub fn can(user: Option<&UserResponse>, capability: Capability) -> bool {
    user.map(|user| role_allows(user.role, capability))
        .unwrap_or(false)
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    // A stored token means a previous session may still be valid; restore
    // it by fetching the profile. Without a token there is nothing to do.
    if storage::auth_token().is_some() {
        set_auth_state.update(|state| state.loading = true);
        let api_client = use_context::<ApiClient>().unwrap_or_default();
        let set_auth_for_check = set_auth_state;
        spawn_local(async move {
            match api_client.get_profile().await {
                Ok(user) => set_auth_for_check.update(|state| {
                    state.user = Some(user);
                    state.is_authenticated = true;
                    state.loading = false;
                }),
                Err(_) => set_auth_for_check.update(|state| {
                    state.user = None;
                    state.is_authenticated = false;
                    state.loading = false;
                }),
            }
        });
    }

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match api.login(request).await {
        Ok(response) => {
            set_auth_state.update(|state| {
                state.user = Some(response.user);
                state.is_authenticated = true;
                state.loading = false;
            });
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// The local session is dropped regardless of the backend outcome.
pub async fn logout(
    api: &ApiClient,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let result = api.logout().await;

    set_auth_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
        state.loading = false;
    });

    result
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |_: &()| {
        let api = api.clone();
        async move { logout(&api, set_auth).await }
    })
}

pub fn use_change_password_action() -> Action<ChangePasswordRequest, Result<String, ApiError>> {
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |request: &ChangePasswordRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { api.change_password(payload).await.map(|r| r.message) }
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::mock::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn use_auth_returns_default_without_context() {
        with_runtime(|| {
            let (state, _set_state) = use_auth();
            let snapshot = state.get();
            assert!(!snapshot.is_authenticated);
            assert!(snapshot.user.is_none());
        });
    }

    #[tokio::test]
    async fn login_and_logout_update_auth_state() {
        let _guard = crate::test_support::session_lock()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/login");
            then.status(200).json_body(serde_json::json!({
                "token": "jwt-session",
                "user": {
                    "id": "u1",
                    "name": "Sarah Admin",
                    "email": "sarah@example.com",
                    "role": "admin"
                }
            }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/auth/logout");
            then.status(200).json_body(serde_json::json!({}));
        });

        let runtime = create_runtime();
        let (state, set_state) = create_signal(AuthState::default());
        let api = ApiClient::new_with_base_url(server.url("/api"));

        login_request(
            LoginRequest {
                email: "sarah@example.com".into(),
                password: "secret".into(),
            },
            &api,
            set_state,
        )
        .await
        .unwrap();

        let snapshot = state.get();
        assert!(snapshot.is_authenticated);
        assert_eq!(snapshot.user.as_ref().map(|u| u.role), Some(Role::Admin));

        logout(&api, set_state).await.unwrap();
        let snapshot = state.get();
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
        runtime.dispose();
    }
}
