mod attendance;
mod auth;
pub mod client;
mod employees;
mod leaves;
pub mod types;

pub use client::*;
pub use leaves::LeaveListQuery;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
