//! Full-page navigation, shared by the auth guards and the gateway's
//! expired-session handling. No-op on the host target, where the last
//! requested target is recorded for assertions instead.

#[cfg(target_arch = "wasm32")]
pub fn redirect_to(path: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(path);
    }
}

#[cfg(target_arch = "wasm32")]
pub fn current_path() -> Option<String> {
    web_sys::window().and_then(|w| w.location().pathname().ok())
}

#[cfg(not(target_arch = "wasm32"))]
mod recorded {
    use std::sync::{Mutex, OnceLock};

    pub(super) fn slot() -> &'static Mutex<Option<String>> {
        static SLOT: OnceLock<Mutex<Option<String>>> = OnceLock::new();
        SLOT.get_or_init(|| Mutex::new(None))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect_to(path: &str) {
    if let Ok(mut slot) = recorded::slot().lock() {
        *slot = Some(path.to_string());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn take_last_redirect() -> Option<String> {
    recorded::slot().lock().ok()?.take()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn host_redirects_are_recorded_not_executed() {
        let _guard = crate::test_support::session_lock()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        redirect_to("/login");
        assert_eq!(take_last_redirect().as_deref(), Some("/login"));
        assert!(take_last_redirect().is_none());
    }
}
