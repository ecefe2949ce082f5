//! Task detail state.
//!
//! # Design
//! - The fetch key is `(group, task id)`; the business group is passed in by
//!   the page rather than read inside the fetch.
//! - Rendering works from a string-only view so missing fields show as empty.

use crate::core::request::FetchModel;
use crate::core::time::format_task_timestamp;
use crate::models::TaskRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity of a task detail fetch.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskKey {
    /// Business group scoping the task endpoint.
    pub group_id: i64,
    /// Task identifier from the route.
    pub task_id: String,
}

impl TaskKey {
    /// Build a key when both parts are defined.
    #[must_use]
    pub fn from_parts(group_id: Option<i64>, task_id: Option<&str>) -> Option<Self> {
        let task_id = task_id.map(str::trim).filter(|id| !id.is_empty())?;
        Some(Self {
            group_id: group_id?,
            task_id: task_id.to_string(),
        })
    }
}

/// Loaded task plus request bookkeeping.
pub type TaskDetailModel = FetchModel<TaskKey, Option<TaskRecord>>;

/// Query string of the task creation form when cloning (`?task=<id>`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneTaskQuery {
    /// Task to copy.
    pub task: String,
}

/// Display strings for the detail table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskView {
    /// Task title.
    pub title: String,
    /// `creator @ created` line.
    pub creator_line: String,
    /// Remote account.
    pub account: String,
    /// Batch size.
    pub batch: String,
    /// Failure tolerance.
    pub tolerance: String,
    /// Timeout in seconds.
    pub timeout: String,
    /// Script body.
    pub script: String,
    /// Script arguments.
    pub args: String,
    /// Pause hosts.
    pub pause: String,
    /// Host names, one per line.
    pub hosts: Vec<String>,
}

impl TaskView {
    /// Build display strings, formatting the creation time in `offset_minutes`.
    #[must_use]
    pub fn from_record(record: &TaskRecord, offset_minutes: i32) -> Self {
        let meta = &record.meta;
        let text = |value: Option<&String>| value.cloned().unwrap_or_default();
        let creator = text(meta.creator.as_ref());
        let created = format_task_timestamp(meta.created.as_ref(), offset_minutes);
        let creator_line = match (creator.is_empty(), created.is_empty()) {
            (true, true) => String::new(),
            _ => format!("{creator} @ {created}"),
        };
        Self {
            title: text(meta.title.as_ref()),
            creator_line,
            account: text(meta.account.as_ref()),
            batch: scalar_text(meta.batch.as_ref()),
            tolerance: scalar_text(meta.tolerance.as_ref()),
            timeout: scalar_text(meta.timeout.as_ref()),
            script: text(meta.script.as_ref()),
            args: text(meta.args.as_ref()),
            pause: text(meta.pause.as_ref()),
            hosts: record.hosts.clone(),
        }
    }
}

/// Display text of a loosely typed scalar: strings verbatim, `null` empty.
fn scalar_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::request::SettleOutcome;
    use crate::models::{TaskDetailData, TaskTimestamp};
    use serde_json::json;

    #[test]
    fn key_requires_group_and_task_id() {
        assert_eq!(TaskKey::from_parts(Some(1), None), None);
        assert_eq!(TaskKey::from_parts(None, Some("9")), None);
        assert_eq!(TaskKey::from_parts(Some(1), Some("  ")), None);
        assert_eq!(
            TaskKey::from_parts(Some(1), Some("9")),
            Some(TaskKey {
                group_id: 1,
                task_id: "9".to_string(),
            })
        );
    }

    #[test]
    fn one_request_per_distinct_task_id() {
        let mut model = TaskDetailModel::default();
        let mut issued = 0;
        for id in [None, Some("1"), Some("1"), Some("2"), Some("2"), None] {
            if model
                .request_if_changed(TaskKey::from_parts(Some(5), id))
                .is_some()
            {
                issued += 1;
            }
        }
        assert_eq!(issued, 2);
    }

    #[test]
    fn group_change_refetches_same_task() {
        let mut model = TaskDetailModel::default();
        assert!(model.request_if_changed(TaskKey::from_parts(Some(1), Some("7"))).is_some());
        assert!(model.request_if_changed(TaskKey::from_parts(Some(2), Some("7"))).is_some());
    }

    #[test]
    fn loaded_record_is_committed_and_flattened() {
        let mut model = TaskDetailModel::default();
        let ticket = model
            .request_if_changed(TaskKey::from_parts(Some(3), Some("42")))
            .expect("ticket");
        assert!(model.loading());
        let data: TaskDetailData = serde_json::from_value(json!({
            "meta": {"title": "X", "creator": "alice"},
            "hosts": [{"host": "h1"}, {"host": "h2"}]
        }))
        .expect("detail decodes");
        let outcome = model.settle::<()>(&ticket, Ok(Some(TaskRecord::from(data))));
        assert_eq!(outcome, SettleOutcome::Applied);
        assert!(!model.loading());
        let record = model.value().as_ref().expect("record");
        assert_eq!(
            serde_json::to_value(record).expect("record encodes"),
            json!({"title": "X", "creator": "alice", "hosts": ["h1", "h2"]})
        );
    }

    #[test]
    fn view_fills_rows_and_leaves_missing_fields_empty() {
        let mut record = TaskRecord::default();
        record.meta.title = Some("deploy".to_string());
        record.meta.creator = Some("alice".to_string());
        record.meta.created = Some(TaskTimestamp::Epoch(1_709_253_000));
        record.meta.batch = Some(json!(0));
        record.hosts = vec!["h1".to_string()];
        let view = TaskView::from_record(&record, 0);
        assert_eq!(view.title, "deploy");
        assert_eq!(view.creator_line, "alice @ 2024-03-01 00:30:00");
        assert_eq!(view.batch, "0");
        assert_eq!(view.account, "");
        assert_eq!(view.timeout, "");
        assert_eq!(view.hosts, vec!["h1"]);
        assert_eq!(TaskView::from_record(&TaskRecord::default(), 0), TaskView::default());
    }

    #[test]
    fn loose_payload_renders_without_failing() {
        let data: TaskDetailData = serde_json::from_value(json!({
            "meta": {"title": "X", "batch": "2", "tolerance": null, "timeout": 30},
            "hosts": null
        }))
        .expect("detail decodes");
        let view = TaskView::from_record(&TaskRecord::from(data), 0);
        assert_eq!(view.title, "X");
        assert_eq!(view.batch, "2");
        assert_eq!(view.tolerance, "");
        assert_eq!(view.timeout, "30");
        assert!(view.hosts.is_empty());
    }

    #[test]
    fn clone_query_serializes_task_param() {
        let query = CloneTaskQuery {
            task: "42".to_string(),
        };
        assert_eq!(serde_json::to_value(&query).expect("query"), json!({"task": "42"}));
    }
}
