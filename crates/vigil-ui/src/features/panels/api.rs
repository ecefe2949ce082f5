//! Prometheus range queries for panel targets.

use crate::features::panels::query::RangeRequest;
use crate::models::PromSeries;
use crate::services::ApiError;
use crate::services::api::ApiClient;

/// Run one planned range query.
pub(crate) async fn query_range(
    client: &ApiClient,
    request: &RangeRequest,
) -> Result<Vec<PromSeries>, ApiError> {
    client
        .get_prometheus(&request.path())
        .await?
        .into_series()
        .map_err(ApiError::Query)
}
