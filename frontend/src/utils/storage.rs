//! Persistent key/value storage.
//!
//! On wasm32 this is backed by `window.localStorage`. On the host target
//! (SSR tests) values live in a process-local map so session-dependent
//! code paths stay exercisable outside a browser.

pub const AUTH_TOKEN_KEY: &str = "hr_auth_token";
pub const CURRENT_USER_KEY: &str = "hr_current_user";
pub const THEME_KEY: &str = "hr_theme";

#[cfg(target_arch = "wasm32")]
mod backend {
    use web_sys::Storage;

    fn local_storage() -> Result<Storage, String> {
        web_sys::window()
            .ok_or_else(|| "No window object".to_string())?
            .local_storage()
            .map_err(|_| "No localStorage".to_string())?
            .ok_or_else(|| "No localStorage".to_string())
    }

    pub fn get_item(key: &str) -> Option<String> {
        local_storage().ok()?.get_item(key).ok().flatten()
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), String> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| format!("Failed to store {key}"))
    }

    pub fn remove_item(key: &str) {
        if let Ok(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::collections::HashMap;
    use std::sync::{Mutex, OnceLock};

    fn store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    pub fn get_item(key: &str) -> Option<String> {
        store().lock().ok()?.get(key).cloned()
    }

    pub fn set_item(key: &str, value: &str) -> Result<(), String> {
        store()
            .lock()
            .map_err(|_| "storage lock".to_string())?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_item(key: &str) {
        if let Ok(mut map) = store().lock() {
            map.remove(key);
        }
    }
}

pub use backend::{get_item, remove_item, set_item};

pub fn auth_token() -> Option<String> {
    get_item(AUTH_TOKEN_KEY)
}

pub fn set_auth_token(token: &str) -> Result<(), String> {
    set_item(AUTH_TOKEN_KEY, token)
}

pub fn clear_auth_token() {
    remove_item(AUTH_TOKEN_KEY);
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        set_item("storage-test-key", "value").unwrap();
        assert_eq!(get_item("storage-test-key").as_deref(), Some("value"));
        remove_item("storage-test-key");
        assert!(get_item("storage-test-key").is_none());
    }

    #[test]
    fn auth_token_helpers_use_the_shared_key() {
        set_auth_token("token-123").unwrap();
        assert_eq!(get_item(AUTH_TOKEN_KEY).as_deref(), Some("token-123"));
        clear_auth_token();
        assert!(auth_token().is_none());
    }
}
