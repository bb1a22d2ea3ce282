//! Runtime configuration.
//!
//! The deployed bundle is static, so configuration arrives at runtime:
//! an optional `window.__STAFFBOARD_ENV` global (env.js) takes precedence,
//! then `window.__STAFFBOARD_CONFIG`, then a fetched `./config.json`,
//! then built-in defaults.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use chrono_tz::Tz;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub time_zone: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static TIME_ZONE: OnceLock<Tz> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;

    fn read_key(obj: &js_sys::Object, key: &str) -> Option<String> {
        js_sys::Reflect::get(obj, &key.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    }

    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        Some(RuntimeConfig {
            api_base_url: read_key(&obj, "api_base_url").or_else(|| read_key(&obj, "API_BASE_URL")),
            time_zone: read_key(&obj, "time_zone").or_else(|| read_key(&obj, "TIME_ZONE")),
        })
    }

    pub fn snapshot() -> Option<RuntimeConfig> {
        read_global("__STAFFBOARD_ENV").or_else(|| read_global("__STAFFBOARD_CONFIG"))
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        let resp = reqwest::get("./config.json").await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod globals {
    use super::RuntimeConfig;

    pub fn snapshot() -> Option<RuntimeConfig> {
        None
    }

    pub async fn fetch_runtime_config() -> Option<RuntimeConfig> {
        None
    }
}

fn apply(config: &RuntimeConfig) {
    if let Some(url) = &config.api_base_url {
        let _ = API_BASE_URL.set(url.clone());
    }
    if let Some(zone) = &config.time_zone {
        match zone.parse::<Tz>() {
            Ok(tz) => {
                let _ = TIME_ZONE.set(tz);
            }
            Err(_) => log::warn!("Unknown time zone in runtime config: {zone}"),
        }
    }
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(existing) = globals::snapshot() {
        apply(&existing);
        if let Some(cached) = API_BASE_URL.get() {
            return cached.clone();
        }
    }
    if let Some(fetched) = globals::fetch_runtime_config().await {
        apply(&fetched);
        if let Some(cached) = API_BASE_URL.get() {
            return cached.clone();
        }
    }
    let _ = API_BASE_URL.set(DEFAULT_API_BASE_URL.to_string());
    API_BASE_URL
        .get()
        .cloned()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub fn current_time_zone() -> Tz {
    TIME_ZONE.get().copied().unwrap_or(chrono_tz::UTC)
}

pub async fn init() {
    let _ = await_api_base_url().await;
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn base_url_falls_back_to_default_without_globals() {
        let url = await_api_base_url().await;
        assert!(url.starts_with("http"));
    }

    #[test]
    fn time_zone_defaults_to_utc() {
        assert_eq!(current_time_zone(), chrono_tz::UTC);
    }
}
