//! Feature slices: each owns its state, API calls, and views.

pub mod dashboard;
pub mod panels;
pub mod tasks;
