//! Dashboard page feature slice.
//!
//! # Design
//! - The page owns the decoded board and persists panel edits itself.
//! - Panels render through the shared panel renderer.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
