//! App shell: routing, shared contexts, and boot-time loading.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
#[cfg(target_arch = "wasm32")]
pub(crate) mod preferences;
#[cfg(target_arch = "wasm32")]
mod root;
mod routes;

#[cfg(target_arch = "wasm32")]
pub use root::run_app;
pub use routes::Route;
