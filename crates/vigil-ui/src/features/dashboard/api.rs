//! API helpers for dashboard boards.

use crate::core::logic::{build_board_configs_path, build_board_path};
use crate::models::{Board, UpdateBoardConfigs};
use crate::services::ApiError;
use crate::services::api::ApiClient;

/// Load a board record.
pub(crate) async fn fetch_board(client: &ApiClient, board_id: &str) -> Result<Board, ApiError> {
    client.get_envelope(&build_board_path(board_id)).await
}

/// Replace a board's configuration document.
pub(crate) async fn save_board_configs(
    client: &ApiClient,
    board_id: &str,
    body: &UpdateBoardConfigs,
) -> Result<(), ApiError> {
    client
        .put_envelope(&build_board_configs_path(board_id), body)
        .await
}
