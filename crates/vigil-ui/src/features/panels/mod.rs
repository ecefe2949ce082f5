//! Panel renderer feature.
//!
//! # Design
//! - Dispatch, menu gating, query planning, and chart geometry are DOM-free.
//! - Hooks and components stay behind the wasm32 gate.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub mod charts;
#[cfg(target_arch = "wasm32")]
pub(crate) mod hooks;
pub mod query;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::PanelRenderer;
