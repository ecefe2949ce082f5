//! Shared, presentation-only components.

pub(crate) mod dropdown;
pub(crate) mod placeholder;
pub(crate) mod rich_text;
pub(crate) mod select;
pub(crate) mod shell;
