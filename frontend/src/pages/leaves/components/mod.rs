pub mod approvals;
pub mod calendar;
pub mod modals;
pub mod request_list;
pub mod stats;
