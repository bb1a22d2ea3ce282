use leptos::*;

use crate::utils::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_class(&self) -> &'static str {
        match self {
            Theme::Light => "",
            Theme::Dark => "dark",
        }
    }

    fn as_key(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

#[cfg(not(target_arch = "wasm32"))]
fn system_prefers_dark() -> bool {
    false
}

fn initial_theme() -> Theme {
    storage::get_item(storage::THEME_KEY)
        .and_then(|key| Theme::from_key(&key))
        .unwrap_or_else(|| {
            if system_prefers_dark() {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
}

#[derive(Clone, Copy)]
pub struct ThemeState {
    pub theme: RwSignal<Theme>,
}

impl ThemeState {
    pub fn new() -> Self {
        let state = Self {
            theme: create_rw_signal(initial_theme()),
        };
        state.apply_to_dom();
        state
    }

    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        let _ = storage::set_item(storage::THEME_KEY, theme.as_key());
        self.apply_to_dom();
    }

    pub fn toggle(&self) {
        let next = match self.theme.get() {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.set_theme(next);
    }

    #[cfg(target_arch = "wasm32")]
    fn apply_to_dom(&self) {
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("class", self.theme.get_untracked().as_class());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn apply_to_dom(&self) {}
}

pub fn use_theme() -> ThemeState {
    match use_context::<ThemeState>() {
        Some(state) => state,
        None => {
            let state = ThemeState::new();
            provide_context(state);
            state
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn theme_toggle_flips_and_persists() {
        with_runtime(|| {
            let state = ThemeState::new();
            let start = state.theme.get();
            state.toggle();
            assert_ne!(state.theme.get(), start);
            let stored = storage::get_item(storage::THEME_KEY);
            assert!(stored.is_some());
        });
    }

    #[test]
    fn theme_keys_round_trip() {
        assert_eq!(Theme::from_key("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_key("light"), Some(Theme::Light));
        assert_eq!(Theme::from_key("solarized"), None);
        assert_eq!(Theme::Dark.as_class(), "dark");
    }
}
