//! Core, DOM-free primitives and helpers for the Web UI.
pub mod logic;
pub mod markdown;
pub mod request;
pub mod store;
pub mod time;
