//! HTTP client helpers for the monitoring backend.

#[cfg(target_arch = "wasm32")]
pub mod api;
pub mod error;

pub use error::ApiError;
