//! Dashboard page state: decoded board, panel edits, and layout.
//!
//! # Design
//! - The board's `configs` string is decoded once per load; a decode failure
//!   degrades to an empty panel list and is reported to the caller.
//! - Panel edits mutate the decoded config and are re-encoded for saving.
//! - Saves replace the whole document, so at most one is in flight; edits
//!   made meanwhile collapse into the newest pending document.

use crate::core::request::FetchModel;
use crate::features::panels::query::VariableBindings;
use crate::models::{Board, BoardConfig, BoardConfigError, Panel, UpdateBoardConfigs};

/// Grid columns of the dashboard layout.
pub const GRID_COLUMNS: u8 = 24;
/// Column span used when a panel has no layout width.
pub const DEFAULT_PANEL_SPAN: u8 = 12;

/// Board plus its decoded configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardView {
    /// Board record.
    pub board: Board,
    /// Decoded configuration.
    pub config: BoardConfig,
}

impl BoardView {
    /// Decode a board; an undecodable `configs` yields an empty configuration
    /// together with the error.
    #[must_use]
    pub fn from_board(board: Board) -> (Self, Option<BoardConfigError>) {
        let (config, error) = match BoardConfig::parse(&board.configs) {
            Ok(config) => (config, None),
            Err(err) => (BoardConfig::default(), Some(err)),
        };
        (Self { board, config }, error)
    }

    /// Variable selections of the board.
    #[must_use]
    pub fn bindings(&self) -> VariableBindings {
        VariableBindings::from_variables(&self.config.variables)
    }

    /// Panel with the given id.
    #[must_use]
    pub fn find_panel(&self, panel_id: &str) -> Option<&Panel> {
        self.config.panels.iter().find(|panel| panel.id == panel_id)
    }

    /// Body for persisting the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::Encode`] when the configuration cannot be serialized.
    pub fn save_body(&self) -> Result<UpdateBoardConfigs, BoardConfigError> {
        Ok(UpdateBoardConfigs {
            configs: self.config.encode()?,
        })
    }
}

/// Loaded board plus request bookkeeping, keyed by board id.
pub type DashboardModel = FetchModel<String, Option<BoardView>>;

/// Insert a copy of `panel_id` right after it, with `new_id` and a
/// `"<name> (copy)"` name. Returns the new id, or `None` when the panel is unknown.
pub fn clone_panel(config: &mut BoardConfig, panel_id: &str, new_id: String) -> Option<String> {
    let index = config.panels.iter().position(|panel| panel.id == panel_id)?;
    let mut copy = config.panels[index].clone();
    copy.id.clone_from(&new_id);
    copy.name = format!("{} (copy)", copy.name);
    config.panels.insert(index + 1, copy);
    Some(new_id)
}

/// Remove `panel_id`. Returns whether a panel was removed.
pub fn remove_panel(config: &mut BoardConfig, panel_id: &str) -> bool {
    let before = config.panels.len();
    config.panels.retain(|panel| panel.id != panel_id);
    config.panels.len() != before
}

/// Whole-document save addressed to a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSave {
    /// Board receiving the document.
    pub board_id: String,
    /// Encoded configuration.
    pub body: UpdateBoardConfigs,
}

/// Orders board saves: one request in flight, newest pending document next.
#[derive(Clone, Debug, Default)]
pub struct SaveQueue {
    in_flight: bool,
    pending: Option<BoardSave>,
}

impl SaveQueue {
    /// Queue `save`. Returns it when nothing is in flight and it should be sent now.
    pub fn submit(&mut self, save: BoardSave) -> Option<BoardSave> {
        if self.in_flight {
            self.pending = Some(save);
            return None;
        }
        self.in_flight = true;
        Some(save)
    }

    /// Mark the in-flight save settled and hand out the next one to send.
    pub fn settle(&mut self) -> Option<BoardSave> {
        let next = self.pending.take();
        self.in_flight = next.is_some();
        next
    }

    /// Whether a save request is outstanding.
    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.in_flight
    }
}

/// Grid column span of a panel, read from `layout.w` and clamped to the grid.
#[must_use]
pub fn panel_span(panel: &Panel) -> u8 {
    panel
        .extra
        .get("layout")
        .and_then(|layout| layout.get("w"))
        .and_then(serde_json::Value::as_u64)
        .and_then(|width| u8::try_from(width).ok())
        .map_or(DEFAULT_PANEL_SPAN, |width| width.clamp(1, GRID_COLUMNS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn board() -> Board {
        let configs = json!({
            "var": [{"name": "job", "definition": "label_values(job)", "selected": ["node", "db"]}],
            "panels": [
                {"id": "a", "name": "CPU", "type": "timeseries", "layout": {"w": 8, "h": 4},
                 "targets": [{"refId": "A", "expr": "up{job=~\"$job\"}"}]},
                {"id": "b", "name": "Load", "type": "stat"}
            ],
            "version": "2.0"
        });
        Board {
            id: 9,
            name: "Hosts".to_string(),
            configs: configs.to_string(),
        }
    }

    #[test]
    fn board_configs_decode_with_bindings() {
        let (view, error) = BoardView::from_board(board());
        assert!(error.is_none());
        assert_eq!(view.config.panels.len(), 2);
        assert_eq!(view.bindings().replacement("job").as_deref(), Some("(node|db)"));
        assert_eq!(view.find_panel("b").map(|p| p.kind.as_str()), Some("stat"));
    }

    #[test]
    fn broken_configs_degrade_to_empty() {
        let (view, error) = BoardView::from_board(Board {
            configs: "{not json".to_string(),
            ..Board::default()
        });
        assert!(error.is_some());
        assert!(view.config.panels.is_empty());
    }

    #[test]
    fn clone_inserts_copy_after_original() {
        let (mut view, _) = BoardView::from_board(board());
        let new_id = clone_panel(&mut view.config, "a", "c".to_string());
        assert_eq!(new_id.as_deref(), Some("c"));
        let ids: Vec<_> = view.config.panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
        assert_eq!(view.config.panels[1].name, "CPU (copy)");
        assert_eq!(view.config.panels[1].targets, view.config.panels[0].targets);
        assert_eq!(clone_panel(&mut view.config, "zz", "d".to_string()), None);
    }

    #[test]
    fn clone_and_delete_survive_a_save_round_trip() {
        let (mut view, _) = BoardView::from_board(board());
        clone_panel(&mut view.config, "a", "c".to_string());
        assert!(remove_panel(&mut view.config, "b"));
        assert!(!remove_panel(&mut view.config, "b"));
        let body = view.save_body().expect("configs encode");
        let saved = BoardConfig::parse(&body.configs).expect("configs decode");
        let ids: Vec<_> = saved.panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(saved.extra.get("version"), Some(&json!("2.0")));
        assert_eq!(saved.variables, view.config.variables);
    }

    fn save(board_id: &str, configs: &str) -> BoardSave {
        BoardSave {
            board_id: board_id.to_string(),
            body: UpdateBoardConfigs {
                configs: configs.to_string(),
            },
        }
    }

    #[test]
    fn saves_are_sent_one_at_a_time() {
        let mut queue = SaveQueue::default();
        assert!(!queue.is_saving());
        assert_eq!(queue.submit(save("9", "v1")), Some(save("9", "v1")));
        assert!(queue.is_saving());
        assert_eq!(queue.submit(save("9", "v2")), None);
        assert_eq!(queue.settle(), Some(save("9", "v2")));
        assert!(queue.is_saving());
        assert_eq!(queue.settle(), None);
        assert!(!queue.is_saving());
    }

    #[test]
    fn only_newest_pending_document_is_sent() {
        let (mut view, _) = BoardView::from_board(board());
        let mut queue = SaveQueue::default();
        clone_panel(&mut view.config, "a", "c".to_string());
        let first = BoardSave {
            board_id: "9".to_string(),
            body: view.save_body().expect("configs encode"),
        };
        assert!(queue.submit(first).is_some());
        remove_panel(&mut view.config, "c");
        let second = view.save_body().expect("configs encode");
        remove_panel(&mut view.config, "b");
        let third = view.save_body().expect("configs encode");
        assert_eq!(queue.submit(BoardSave { board_id: "9".to_string(), body: second }), None);
        assert_eq!(
            queue.submit(BoardSave { board_id: "9".to_string(), body: third.clone() }),
            None
        );
        let next = queue.settle().expect("pending save");
        assert_eq!(next.body, third);
        let saved = BoardConfig::parse(&next.body.configs).expect("configs decode");
        let ids: Vec<_> = saved.panels.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
        assert_eq!(queue.settle(), None);
    }

    #[test]
    fn span_reads_layout_width() {
        let (view, _) = BoardView::from_board(board());
        assert_eq!(panel_span(&view.config.panels[0]), 8);
        assert_eq!(panel_span(&view.config.panels[1]), DEFAULT_PANEL_SPAN);
        let mut wide = view.config.panels[0].clone();
        wide.extra.insert("layout".to_string(), json!({"w": 99}));
        assert_eq!(panel_span(&wide), GRID_COLUMNS);
    }
}
