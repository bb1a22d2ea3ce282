#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub fn session_lock() -> &'static std::sync::Mutex<()> {
    // Tests that read or clear the persisted session token share one lock;
    // the host storage backend is process-global.
    static LOCK: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    LOCK.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(test)]
pub mod helpers {
    use crate::api::{Role, UserResponse};
    use crate::state::auth::AuthState;
    use leptos::*;

    pub fn user_with_role(role: Role) -> UserResponse {
        UserResponse {
            id: format!("u-{}", role.as_str()),
            name: match role {
                Role::Admin => "Sarah Admin".to_string(),
                Role::Hr => "Lisa HR".to_string(),
                Role::Manager => "John Manager".to_string(),
                _ => "Mike Employee".to_string(),
            },
            email: format!("{}@example.com", role.as_str()),
            role,
        }
    }

    pub fn admin_user() -> UserResponse {
        user_with_role(Role::Admin)
    }

    pub fn regular_user() -> UserResponse {
        user_with_role(Role::Employee)
    }

    pub fn provide_auth(
        user: Option<UserResponse>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let is_authenticated = user.is_some();
        let (auth, set_auth) = create_signal(AuthState {
            user,
            is_authenticated,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
