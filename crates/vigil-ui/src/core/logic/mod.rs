//! Pure UI helpers extracted from components for non-wasm testing.

use std::fmt::Write;

/// Base path of the monitoring backend API.
pub const API_PREFIX: &str = "/api/n9e";

/// Business group list endpoint.
#[must_use]
pub fn build_busi_groups_path() -> String {
    format!("{API_PREFIX}/busi-groups")
}

/// Task collection endpoint scoped to a business group.
#[must_use]
pub fn build_task_path(group_id: i64) -> String {
    format!("{API_PREFIX}/busi-group/{group_id}/task")
}

/// Task detail endpoint: `<task-endpoint>/<id>`.
#[must_use]
pub fn build_task_detail_path(group_id: i64, task_id: &str) -> String {
    format!(
        "{}/{}",
        build_task_path(group_id),
        urlencoding::encode(task_id.trim())
    )
}

/// Dashboard board endpoint.
#[must_use]
pub fn build_board_path(board_id: &str) -> String {
    format!("{API_PREFIX}/board/{}", urlencoding::encode(board_id.trim()))
}

/// Endpoint that replaces a board's configuration document.
#[must_use]
pub fn build_board_configs_path(board_id: &str) -> String {
    format!("{}/configs", build_board_path(board_id))
}

/// Prometheus range query endpoint behind the backend proxy.
#[must_use]
pub fn build_query_range_path(query: &str, start: i64, end: i64, step: i64) -> String {
    let mut path = format!("{API_PREFIX}/prometheus/api/v1/query_range");
    let _ = write!(
        path,
        "?query={}&start={start}&end={end}&step={step}",
        urlencoding::encode(query)
    );
    path
}

/// Join the API base URL and a path without doubling slashes.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Format a numeric value with optional fixed decimals and unit suffix.
///
/// Non-finite values render as `-` (NaN) or signed infinity. Without explicit
/// decimals, values of 100 and above are rounded to integers and smaller ones
/// keep up to three significant decimals.
#[must_use]
pub fn format_value(value: f64, decimals: Option<u8>, unit: Option<&str>) -> String {
    let body = if value.is_nan() {
        return "-".to_string();
    } else if value.is_infinite() {
        if value.is_sign_positive() { "+Inf".to_string() } else { "-Inf".to_string() }
    } else if let Some(decimals) = decimals {
        format!("{value:.prec$}", prec = usize::from(decimals))
    } else if value.abs() >= 100.0 || value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        trim_decimals(&format!("{value:.3}"))
    };
    match unit.map(str::trim).filter(|unit| !unit.is_empty()) {
        Some("%") => format!("{body}%"),
        Some(unit) => format!("{body} {unit}"),
        None => body,
    }
}

fn trim_decimals(raw: &str) -> String {
    if raw.contains('.') {
        raw.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        raw.to_string()
    }
}
