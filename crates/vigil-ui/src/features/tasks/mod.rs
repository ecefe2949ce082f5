//! Task detail feature wiring.
//!
//! # Design
//! - Keep the task fetch in the feature layer; the page owns its state.
//! - The current business group is injected by the page.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
