pub mod utils;

mod panel;

pub use panel::{SettingsPage, SettingsPanel};
