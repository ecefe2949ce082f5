//! Dashboard board DTOs.
//!
//! A board's `configs` field is a JSON document serialized into a string. It
//! carries the variable list and the panel definitions; fields this crate does
//! not model are kept in `extra` maps so a save writes them back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Board record returned by `GET /api/n9e/board/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Board {
    /// Numeric board identifier.
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// JSON-encoded [`BoardConfig`]; empty for a fresh board.
    #[serde(default)]
    pub configs: String,
}

/// Body for `PUT /api/n9e/board/<id>/configs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateBoardConfigs {
    /// JSON-encoded [`BoardConfig`].
    pub configs: String,
}

/// Errors raised while decoding or encoding a board configuration document.
#[derive(Debug, Error)]
pub enum BoardConfigError {
    /// The `configs` string was not a valid configuration document.
    #[error("board configuration is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    /// The configuration could not be serialized back into a string.
    #[error("board configuration could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decoded board configuration document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BoardConfig {
    /// Dashboard variables with their current selection.
    #[serde(rename = "var")]
    pub variables: Vec<BoardVariable>,
    /// Panels in display order.
    pub panels: Vec<Panel>,
    /// Unmodelled top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BoardConfig {
    /// Parse a `configs` string; an empty string yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::Decode`] when the string is not a valid document.
    pub fn parse(raw: &str) -> Result<Self, BoardConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(BoardConfigError::Decode)
    }

    /// Encode the configuration back into the `configs` string form.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::Encode`] when serialization fails.
    pub fn encode(&self) -> Result<String, BoardConfigError> {
        serde_json::to_string(self).map_err(BoardConfigError::Encode)
    }
}

/// Dashboard variable definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BoardVariable {
    /// Name referenced as `$name` or `${name}` in queries.
    pub name: String,
    /// Query or list the options were generated from.
    pub definition: String,
    /// Current selection, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<VariableValue>,
    /// Unmodelled fields (options, multi flags, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Selected value for a dashboard variable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum VariableValue {
    /// Single selection.
    Single(String),
    /// Multi selection.
    Multi(Vec<String>),
}

/// Panel definition as stored in a board configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Panel {
    /// Panel identifier, unique within the board.
    pub id: String,
    /// Display name shown in the header.
    pub name: String,
    /// Chart type tag (`timeseries`, `stat`, `table`, `pie`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Query targets.
    pub targets: Vec<PanelTarget>,
    /// Markdown description shown in the header tooltip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Drill-through URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Display options shared by the chart renderers.
    pub options: PanelOptions,
    /// Unmodelled fields (layout, overrides, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Panel {
    /// Whether the panel carries no configuration at all (decoded from `{}`).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self == &Self::default()
    }

    /// Drill-through link, ignoring blank strings.
    #[must_use]
    pub fn drill_link(&self) -> Option<&str> {
        self.link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    /// Description, ignoring blank strings.
    #[must_use]
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// A single PromQL target of a panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct PanelTarget {
    /// Reference id (`A`, `B`, ...).
    #[serde(rename = "refId")]
    pub ref_id: String,
    /// PromQL expression, possibly containing variables.
    pub expr: String,
    /// Legend template such as `{{instance}}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<String>,
}

/// Display options consumed by the chart renderers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PanelOptions {
    /// Unit suffix appended to formatted values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Fixed number of decimals for formatted values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
    /// Unmodelled option fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
