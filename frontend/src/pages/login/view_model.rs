use super::utils::LoginFormState;
use crate::api::{ApiError, LoginRequest};
use crate::state::auth;
use crate::utils::nav;
use leptos::*;

#[derive(Clone)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
}

impl LoginViewModel {
    pub fn on_submit(&self) -> impl Fn() {
        let form = self.form;
        let error = self.error;
        let login_action = self.login_action;
        move || {
            match form.to_payload() {
                Ok(payload) => {
                    error.set(None);
                    login_action.dispatch(payload);
                }
                Err(err) => error.set(Some(err)),
            }
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();

    let form_copy = form;
    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form_copy.clear_password();
                    nav::redirect_to("/attendance");
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        error,
        login_action,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.form.email.get().is_empty());
        });
    }

    #[test]
    fn submit_with_invalid_form_sets_error_without_dispatch() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.on_submit()();
            assert!(vm.error.get().is_some());
            assert!(vm.login_action.value().get().is_none());
        });
    }
}
