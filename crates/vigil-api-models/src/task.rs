//! Job-execution task DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Payload of `GET /api/n9e/busi-group/<group>/task/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TaskDetailData {
    /// Flat task metadata.
    #[serde(deserialize_with = "null_as_default")]
    pub meta: TaskMeta,
    /// Host assignment records in execution order; `null` reads as empty.
    #[serde(deserialize_with = "null_as_default")]
    pub hosts: Vec<TaskHost>,
}

/// Flat task metadata; every field is optional so partial records still render.
///
/// Numeric fields are kept as raw JSON values: backends send them as numbers
/// or as numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TaskMeta {
    /// Task identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Task title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Remote account the script runs as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Hosts executed concurrently per batch; 0 means all at once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<Value>,
    /// Failures tolerated before the task stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<Value>,
    /// Per-host timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Value>,
    /// Hosts after which execution pauses, comma separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<String>,
    /// Script body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    /// Script arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
    /// Creator login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Creation time as sent by the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<TaskTimestamp>,
    /// Fields this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Creation timestamp: RFC 3339 text or a unix epoch number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TaskTimestamp {
    /// Unix epoch in seconds or milliseconds.
    Epoch(i64),
    /// RFC 3339 / ISO 8601 text.
    Text(String),
}

/// Host assignment record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TaskHost {
    /// Host name.
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    /// Execution status and other per-host fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Flattened task view: metadata fields plus the simplified host list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TaskRecord {
    /// Task metadata, serialized inline.
    #[serde(flatten)]
    pub meta: TaskMeta,
    /// Host names in execution order.
    #[serde(default)]
    pub hosts: Vec<String>,
}

impl From<TaskDetailData> for TaskRecord {
    fn from(data: TaskDetailData) -> Self {
        Self {
            meta: data.meta,
            hosts: data.hosts.into_iter().map(|host| host.host).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_flattens_meta_and_host_names() {
        let data: TaskDetailData = serde_json::from_value(json!({
            "meta": {"title": "X", "creator": "alice"},
            "hosts": [{"host": "h1", "status": "success"}, {"host": "h2"}]
        }))
        .expect("detail decodes");
        let record = TaskRecord::from(data);
        assert_eq!(
            serde_json::to_value(&record).expect("record encodes"),
            json!({"title": "X", "creator": "alice", "hosts": ["h1", "h2"]})
        );
    }

    #[test]
    fn full_meta_decodes_typed_fields_and_keeps_extras() {
        let meta: TaskMeta = serde_json::from_value(json!({
            "id": 42,
            "title": "restart nginx",
            "account": "root",
            "batch": 2,
            "tolerance": 1,
            "timeout": 30,
            "pause": "h3",
            "script": "#!/bin/sh\nsystemctl restart nginx",
            "args": "--now",
            "creator": "root",
            "created": "2024-03-01T08:30:00+08:00",
            "done": false
        }))
        .expect("meta decodes");
        assert_eq!(meta.id, Some(json!(42)));
        assert_eq!(meta.batch, Some(json!(2)));
        assert_eq!(
            meta.created,
            Some(TaskTimestamp::Text("2024-03-01T08:30:00+08:00".to_string()))
        );
        assert_eq!(meta.extra.get("done"), Some(&json!(false)));
    }

    #[test]
    fn epoch_created_decodes_as_number() {
        let meta: TaskMeta =
            serde_json::from_value(json!({"created": 1_709_253_000})).expect("meta decodes");
        assert_eq!(meta.created, Some(TaskTimestamp::Epoch(1_709_253_000)));
    }

    #[test]
    fn null_hosts_and_meta_read_as_empty() {
        let data: TaskDetailData =
            serde_json::from_value(json!({"meta": {"title": "X"}, "hosts": null}))
                .expect("null hosts decode");
        assert!(data.hosts.is_empty());
        assert_eq!(data.meta.title.as_deref(), Some("X"));

        let data: TaskDetailData =
            serde_json::from_value(json!({"meta": null, "hosts": [{"host": null}]}))
                .expect("null meta decodes");
        assert_eq!(data.meta, TaskMeta::default());
        assert_eq!(TaskRecord::from(data).hosts, vec![String::new()]);
    }

    #[test]
    fn stringly_typed_control_params_decode() {
        let data: TaskDetailData = serde_json::from_value(json!({
            "meta": {"id": "42", "batch": "2", "tolerance": null, "timeout": 30},
            "hosts": []
        }))
        .expect("detail decodes");
        assert_eq!(data.meta.id, Some(json!("42")));
        assert_eq!(data.meta.batch, Some(json!("2")));
        assert_eq!(data.meta.tolerance, None);
        assert_eq!(data.meta.timeout, Some(json!(30)));
    }

    #[test]
    fn empty_payload_is_an_empty_record() {
        let data: TaskDetailData = serde_json::from_value(json!({})).expect("detail decodes");
        let record = TaskRecord::from(data);
        assert_eq!(record, TaskRecord::default());
        assert!(record.hosts.is_empty());
    }
}
