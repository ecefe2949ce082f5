//! UI-facing models: backend DTOs plus the resolved series shape charts consume.

use std::collections::BTreeMap;

pub use vigil_api_models::{
    ApiEnvelope, Board, BoardConfig, BoardConfigError, BoardVariable, BusinessGroup,
    EnvelopeError, Panel, PanelOptions, PanelTarget, PromResponse, PromSample, PromSeries,
    TaskDetailData, TaskHost, TaskMeta, TaskRecord, TaskTimestamp, UpdateBoardConfigs,
    VariableValue,
};

/// Resolved data for one returned series of a panel target.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Stable key within a panel (`<refId>/<canonical name>`).
    pub id: String,
    /// Target the series came from.
    pub ref_id: String,
    /// Display name (legend template applied, or canonical form).
    pub name: String,
    /// Label set.
    pub labels: BTreeMap<String, String>,
    /// Ordered `(unix_seconds, value)` points; specials are kept as `f64`.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Most recent finite value.
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.points
            .iter()
            .rev()
            .map(|(_, value)| *value)
            .find(|value| value.is_finite())
    }

    /// Finite values in time order.
    pub fn finite_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points
            .iter()
            .map(|(_, value)| *value)
            .filter(|value| value.is_finite())
    }
}
