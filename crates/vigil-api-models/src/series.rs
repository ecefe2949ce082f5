//! Prometheus HTTP API payloads (range queries).
//!
//! The backend proxies `/api/v1/query_range` verbatim, so these types follow
//! the upstream JSON rather than the `{dat, err}` envelope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level Prometheus API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromResponse {
    /// `success` or `error`.
    pub status: String,
    /// Result payload when the query succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PromData>,
    /// Error category when the query failed.
    #[serde(
        default,
        rename = "errorType",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_type: Option<String>,
    /// Error message when the query failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PromResponse {
    /// Whether Prometheus reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Consume the response, yielding the series or the reported error message.
    ///
    /// # Errors
    ///
    /// Returns the upstream error message (or status) when the query failed.
    pub fn into_series(self) -> Result<Vec<PromSeries>, String> {
        if !self.is_success() {
            let kind = self.error_type.unwrap_or_else(|| self.status.clone());
            let message = self.error.unwrap_or_default();
            return Err(format!("{kind}: {message}"));
        }
        Ok(self.data.map(|data| data.result).unwrap_or_default())
    }
}

/// `data` member of a range query response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromData {
    /// Result type; `matrix` for range queries.
    #[serde(rename = "resultType")]
    pub result_type: String,
    /// Returned series.
    #[serde(default)]
    pub result: Vec<PromSeries>,
}

/// A single labelled series of a matrix result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromSeries {
    /// Label set, including `__name__` when present.
    #[serde(default)]
    pub metric: BTreeMap<String, String>,
    /// Ordered `[timestamp, "value"]` samples.
    #[serde(default)]
    pub values: Vec<PromSample>,
}

/// One `[unix_seconds, "value"]` sample pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromSample(pub f64, pub String);

impl PromSample {
    /// Sample timestamp in unix seconds.
    #[must_use]
    pub const fn timestamp(&self) -> f64 {
        self.0
    }

    /// Numeric sample value; Prometheus special values map to their `f64`
    /// counterparts and anything unparseable becomes `NaN`.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self.1.as_str() {
            "NaN" => f64::NAN,
            "+Inf" | "Inf" => f64::INFINITY,
            "-Inf" => f64::NEG_INFINITY,
            other => other.parse().unwrap_or(f64::NAN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matrix_response_decodes_samples() {
        let response: PromResponse = serde_json::from_value(json!({
            "status": "success",
            "data": {
                "resultType": "matrix",
                "result": [{
                    "metric": {"__name__": "up", "instance": "h1:9100"},
                    "values": [[1_700_000_000.0, "1"], [1_700_000_015.5, "NaN"], [1_700_000_030, "+Inf"]]
                }]
            }
        }))
        .expect("response decodes");
        let series = response.into_series().expect("success");
        assert_eq!(series.len(), 1);
        let samples = &series[0].values;
        assert_eq!(samples[0].value(), 1.0);
        assert!(samples[1].value().is_nan());
        assert_eq!(samples[1].timestamp(), 1_700_000_015.5);
        assert_eq!(samples[2].value(), f64::INFINITY);
        assert_eq!(series[0].metric.get("instance").map(String::as_str), Some("h1:9100"));
    }

    #[test]
    fn error_response_yields_message() {
        let response: PromResponse = serde_json::from_value(json!({
            "status": "error",
            "errorType": "bad_data",
            "error": "parse error at char 4"
        }))
        .expect("response decodes");
        assert_eq!(
            response.into_series(),
            Err("bad_data: parse error at char 4".to_string())
        );
    }

    #[test]
    fn garbage_value_is_nan() {
        assert!(PromSample(0.0, "abc".to_string()).value().is_nan());
        assert_eq!(PromSample(0.0, "-Inf".to_string()).value(), f64::NEG_INFINITY);
    }
}
