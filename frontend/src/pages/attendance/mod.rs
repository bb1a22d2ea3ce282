pub mod repository;
pub mod utils;
pub mod view_model;

mod panel;

pub use panel::{AttendancePage, AttendancePanel};
