use leptos::*;

use crate::api::{ApiError, LoginRequest};

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl LoginFormState {
    pub fn to_payload(&self) -> Result<LoginRequest, ApiError> {
        let email = self.email.get().trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::validation("Please enter a valid email address."));
        }
        let password = self.password.get();
        if password.is_empty() {
            return Err(ApiError::validation("Please enter your password."));
        }
        Ok(LoginRequest { email, password })
    }

    pub fn clear_password(&self) {
        self.password.set(String::new());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn payload_requires_email_shape_and_password() {
        with_runtime(|| {
            let form = LoginFormState::default();
            assert!(form.to_payload().is_err());

            form.email.set("not-an-email".into());
            form.password.set("secret".into());
            assert!(form.to_payload().is_err());

            form.email.set(" sarah@example.com ".into());
            let payload = form.to_payload().unwrap();
            assert_eq!(payload.email, "sarah@example.com");
        });
    }
}
