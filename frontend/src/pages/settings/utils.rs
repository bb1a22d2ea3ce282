use leptos::*;

use crate::api::{ApiError, ChangePasswordRequest};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Copy)]
pub struct ChangePasswordFormState {
    pub current_password: RwSignal<String>,
    pub new_password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
}

impl ChangePasswordFormState {
    pub fn new() -> Self {
        Self {
            current_password: create_rw_signal(String::new()),
            new_password: create_rw_signal(String::new()),
            confirm_password: create_rw_signal(String::new()),
        }
    }

    pub fn reset(&self) {
        self.current_password.set(String::new());
        self.new_password.set(String::new());
        self.confirm_password.set(String::new());
    }

    pub fn to_payload(&self) -> Result<ChangePasswordRequest, ApiError> {
        let current_password = self.current_password.get();
        if current_password.is_empty() {
            return Err(ApiError::validation("Please enter your current password."));
        }
        let new_password = self.new_password.get();
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation(format!(
                "New password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        if new_password != self.confirm_password.get() {
            return Err(ApiError::validation("Passwords do not match."));
        }
        Ok(ChangePasswordRequest {
            current_password,
            new_password,
        })
    }
}
