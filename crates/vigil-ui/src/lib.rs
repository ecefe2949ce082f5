#![forbid(unsafe_code)]
#![deny(
    unused_imports,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(
    dead_code,
    unused,
    unreachable_pub,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Vigil monitoring console web UI.
//!
//! Dashboards render panels from a board's configuration and query series
//! through the backend's Prometheus proxy; the job-task area shows a task's
//! execution parameters. Everything that does not touch the DOM compiles
//! natively and is unit tested; components and HTTP calls are wasm-only.

pub mod app;
#[cfg(target_arch = "wasm32")]
mod components;
pub mod core;
pub mod features;
pub mod i18n;
pub mod models;
pub mod services;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
