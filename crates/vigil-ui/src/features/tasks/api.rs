//! API helpers for task records.
//!
//! # Design
//! - Keep HTTP calls localized to the feature layer.
//! - The business group is an explicit argument.

use crate::core::logic::build_task_detail_path;
use crate::models::{TaskDetailData, TaskRecord};
use crate::services::ApiError;
use crate::services::api::ApiClient;

/// Fetch a task and flatten it into a [`TaskRecord`].
pub(crate) async fn fetch_task_detail(
    client: &ApiClient,
    group_id: i64,
    task_id: &str,
) -> Result<TaskRecord, ApiError> {
    let path = build_task_detail_path(group_id, task_id);
    let data: TaskDetailData = client.get_envelope(&path).await?;
    Ok(TaskRecord::from(data))
}
