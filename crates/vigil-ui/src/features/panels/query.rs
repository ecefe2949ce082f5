//! Series query planning and result shaping for panels.
//!
//! # Design
//! - Planning is pure: variables are substituted and the time window is
//!   resolved against an explicit `now`, yielding one request per target.
//! - Per-target failures do not poison the batch; only an all-failed batch
//!   is reported as a failure so the caller can keep the previous series.

use crate::core::logic::build_query_range_path;
use crate::core::time::{TimeRange, effective_step};
use crate::models::{BoardVariable, PanelTarget, PromSeries, Series, VariableValue};
use crate::services::ApiError;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Current variable selections keyed by variable name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableBindings {
    values: BTreeMap<String, VariableValue>,
}

impl VariableBindings {
    /// Collect selections from board variables; unselected variables are skipped.
    #[must_use]
    pub fn from_variables(variables: &[BoardVariable]) -> Self {
        let values = variables
            .iter()
            .filter(|variable| !variable.name.trim().is_empty())
            .filter_map(|variable| {
                variable
                    .selected
                    .clone()
                    .map(|value| (variable.name.trim().to_string(), value))
            })
            .collect();
        Self { values }
    }

    /// Bind `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: VariableValue) {
        self.values.insert(name.into(), value);
    }

    /// Replacement text for `name`, if bound to a non-empty selection.
    #[must_use]
    pub fn replacement(&self, name: &str) -> Option<String> {
        match self.values.get(name)? {
            VariableValue::Single(value) => Some(value.clone()),
            VariableValue::Multi(values) if values.is_empty() => None,
            VariableValue::Multi(values) => Some(format!("({})", values.join("|"))),
        }
    }

    /// Whether no variable is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Substitute `$name` and `${name}` references. Unknown names stay verbatim.
#[must_use]
pub fn substitute_variables(expr: &str, bindings: &VariableBindings) -> String {
    if bindings.is_empty() || !expr.contains('$') {
        return expr.to_string();
    }
    let mut out = String::with_capacity(expr.len());
    let mut rest = expr;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };
        match (!name.is_empty()).then(|| bindings.replacement(name)).flatten() {
            Some(value) => {
                out.push_str(&value);
                rest = &after[consumed..];
            }
            None => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Inputs of the series query layer.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesQuery {
    /// Panel id, when the panel has one.
    pub id: Option<String>,
    /// Owning dashboard id.
    pub dashboard_id: String,
    /// Time window.
    pub range: TimeRange,
    /// Explicit step in seconds; automatic when absent.
    pub step: Option<u32>,
    /// Panel targets.
    pub targets: Vec<PanelTarget>,
    /// Variable selections.
    pub bindings: VariableBindings,
}

/// One planned `query_range` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeRequest {
    /// Target reference id.
    pub ref_id: String,
    /// Legend template of the target.
    pub legend: Option<String>,
    /// PromQL after variable substitution.
    pub query: String,
    /// Window start (unix seconds).
    pub start: i64,
    /// Window end (unix seconds).
    pub end: i64,
    /// Step in seconds.
    pub step: i64,
}

impl RangeRequest {
    /// Request path relative to the API base.
    #[must_use]
    pub fn path(&self) -> String {
        build_query_range_path(&self.query, self.start, self.end, self.step)
    }
}

/// Plan one request per non-empty target, resolving the window against `now`.
#[must_use]
pub fn plan_range_requests(query: &SeriesQuery, now: i64) -> Vec<RangeRequest> {
    let (start, end) = query.range.resolve(now);
    let step = effective_step(query.step, start, end);
    query
        .targets
        .iter()
        .filter_map(|target| {
            let expr = substitute_variables(target.expr.trim(), &query.bindings);
            if expr.trim().is_empty() {
                return None;
            }
            Some(RangeRequest {
                ref_id: target.ref_id.clone(),
                legend: target.legend.clone().filter(|legend| !legend.trim().is_empty()),
                query: expr,
                start,
                end,
                step,
            })
        })
        .collect()
}

/// Apply a `{{label}}` legend template. Missing labels render empty.
#[must_use]
pub fn render_legend(template: &str, labels: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open + 2..].find("}}") else {
            break;
        };
        out.push_str(&rest[..open]);
        let key = rest[open + 2..open + 2 + close].trim();
        if let Some(value) = labels.get(key) {
            out.push_str(value);
        }
        rest = &rest[open + 2 + close + 2..];
    }
    out.push_str(rest);
    out
}

/// Canonical `metric{k="v", ...}` name of a label set.
#[must_use]
pub fn canonical_name(labels: &BTreeMap<String, String>) -> String {
    let mut out = labels.get("__name__").cloned().unwrap_or_default();
    let mut pairs = labels.iter().filter(|(key, _)| key.as_str() != "__name__");
    if let Some((key, value)) = pairs.next() {
        let _ = write!(out, "{{{key}=");
        push_quoted(&mut out, value);
        for (key, value) in pairs {
            let _ = write!(out, ", {key}=");
            push_quoted(&mut out, value);
        }
        out.push('}');
    } else if out.is_empty() {
        out.push_str("{}");
    }
    out
}

/// Append `value` as a double-quoted label value with Prometheus escapes.
fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            ch => out.push(ch),
        }
    }
    out.push('"');
}

/// Shape Prometheus series returned for `request` into display series.
#[must_use]
pub fn series_from_prom(request: &RangeRequest, raw: Vec<PromSeries>) -> Vec<Series> {
    raw.into_iter()
        .map(|series| {
            let canonical = canonical_name(&series.metric);
            let name = request
                .legend
                .as_deref()
                .map(|template| render_legend(template, &series.metric))
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| canonical.clone());
            Series {
                id: format!("{}/{canonical}", request.ref_id),
                ref_id: request.ref_id.clone(),
                name,
                points: series
                    .values
                    .iter()
                    .map(|sample| (sample.timestamp(), sample.value()))
                    .collect(),
                labels: series.metric,
            }
        })
        .collect()
}

/// A target whose request failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetFailure {
    /// Target reference id.
    pub ref_id: String,
    /// Failure cause.
    pub error: ApiError,
}

/// Merged outcome of one generation of target requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetBatch {
    series: Vec<Series>,
    failures: Vec<TargetFailure>,
    attempted: usize,
}

impl TargetBatch {
    /// Merge per-target results in target order.
    pub fn collect<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (RangeRequest, Result<Vec<PromSeries>, ApiError>)>,
    {
        let mut batch = Self::default();
        for (request, result) in results {
            batch.attempted += 1;
            match result {
                Ok(raw) => batch.series.extend(series_from_prom(&request, raw)),
                Err(error) => batch.failures.push(TargetFailure {
                    ref_id: request.ref_id,
                    error,
                }),
            }
        }
        batch
    }

    /// Failed targets.
    #[must_use]
    pub fn failures(&self) -> &[TargetFailure] {
        &self.failures
    }

    /// Series to commit, or the failures when every target failed.
    ///
    /// # Errors
    ///
    /// Returns the failures when at least one target was attempted and none succeeded.
    pub fn into_result(self) -> Result<Vec<Series>, Vec<TargetFailure>> {
        if self.attempted > 0 && self.failures.len() == self.attempted {
            Err(self.failures)
        } else {
            Ok(self.series)
        }
    }
}
