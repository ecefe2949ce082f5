#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Vigil console.
//!
//! The monitoring backend wraps every JSON body in a `{dat, err}` envelope,
//! except for the Prometheus passthrough which keeps the upstream shape. These
//! types stay DOM-free so the UI crate can exercise them in native tests.

pub mod board;
pub mod series;
pub mod task;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::{
    Board, BoardConfig, BoardConfigError, BoardVariable, Panel, PanelOptions, PanelTarget,
    UpdateBoardConfigs, VariableValue,
};
pub use series::{PromData, PromResponse, PromSample, PromSeries};
pub use task::{TaskDetailData, TaskHost, TaskMeta, TaskRecord, TaskTimestamp};

/// Standard `{dat, err}` response wrapper returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    /// Payload; absent or null when the request failed.
    pub dat: Option<T>,
    /// Error message; empty on success.
    #[serde(default)]
    pub err: String,
}

/// Failure reported inside an otherwise well-formed envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The backend populated the `err` field.
    #[error("backend reported an error: {0}")]
    Backend(String),
    /// Neither `dat` nor `err` carried anything.
    #[error("response envelope carried no data")]
    MissingData,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, surfacing the backend error message when present.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Backend`] when `err` is non-empty and
    /// [`EnvelopeError::MissingData`] when the payload is absent.
    pub fn into_result(self) -> Result<T, EnvelopeError> {
        let message = self.err.trim();
        if !message.is_empty() {
            return Err(EnvelopeError::Backend(message.to_string()));
        }
        self.dat.ok_or(EnvelopeError::MissingData)
    }
}

/// Organisational unit that scopes task endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BusinessGroup {
    /// Numeric group identifier.
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
}
