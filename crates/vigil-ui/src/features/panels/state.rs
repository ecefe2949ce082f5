//! Panel renderer state: chart-type dispatch, fetch gating, and header menu.
//!
//! # Design
//! - Dispatch is a closed enum; unknown tags become an explicit `Invalid`
//!   body instead of falling through to a renderer.
//! - Menu entries are computed data so preview gating is testable natively.

use crate::models::Panel;
use yew::Callback;

/// Rendering strategy selected by a panel's type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Line chart over time.
    Timeseries,
    /// Single aggregated value.
    Stat,
    /// Last value per series in rows.
    Table,
    /// Share of the last value per series.
    Pie,
}

impl ChartKind {
    /// Every supported kind.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Timeseries, Self::Stat, Self::Table, Self::Pie]
    }

    /// Type tag as stored in panel configuration.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Timeseries => "timeseries",
            Self::Stat => "stat",
            Self::Table => "table",
            Self::Pie => "pie",
        }
    }

    /// Look up a kind by its exact tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().into_iter().find(|kind| kind.tag() == tag)
    }
}

/// What the panel body shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelBody {
    /// No configuration; nothing is rendered at all.
    Empty,
    /// Render with the given strategy.
    Chart(ChartKind),
    /// Unknown tag; show the message and invoke no renderer.
    Invalid(String),
}

impl PanelBody {
    /// Resolve the body for a panel configuration and type tag.
    #[must_use]
    pub fn resolve(panel: Option<&Panel>, tag: &str) -> Self {
        match panel {
            None => Self::Empty,
            Some(panel) if panel.is_blank() => Self::Empty,
            Some(_) => ChartKind::from_tag(tag)
                .map_or_else(|| Self::Invalid(invalid_chart_message(tag)), Self::Chart),
        }
    }

    /// Whether anything should be rendered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Inline message for an unsupported type tag.
#[must_use]
pub fn invalid_chart_message(tag: &str) -> String {
    format!("Invalid chart type {tag}")
}

/// Series are fetched for previews regardless of visibility, otherwise only
/// while the panel is in the viewport.
#[must_use]
pub const fn fetch_enabled(is_preview: bool, in_viewport: bool) -> bool {
    is_preview || in_viewport
}

/// Header dropdown action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelAction {
    /// Open the drill-through link.
    DrillLink,
    /// Open the panel editor.
    Edit,
    /// Duplicate the panel.
    Clone,
    /// Open the shareable single-panel view.
    Share,
    /// Remove the panel.
    Delete,
}

impl PanelAction {
    /// Translation key for the menu label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::DrillLink => "panel.drill_link",
            Self::Edit => "panel.edit",
            Self::Clone => "panel.clone",
            Self::Share => "panel.share",
            Self::Delete => "panel.delete",
        }
    }

    /// English label used when a translation is missing.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::DrillLink => "Drill-down link",
            Self::Edit => "Edit",
            Self::Clone => "Clone",
            Self::Share => "Share",
            Self::Delete => "Delete",
        }
    }
}

/// One row of the header dropdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelMenuEntry {
    /// Action triggered by the row.
    pub action: PanelAction,
    /// Whether the row is shown but inert.
    pub disabled: bool,
    /// Target URL for link rows.
    pub href: Option<String>,
}

/// Dropdown rows for a panel. The drill-through link is always listed
/// (disabled without a link); editing actions only outside preview.
#[must_use]
pub fn panel_menu(panel: &Panel, is_preview: bool) -> Vec<PanelMenuEntry> {
    let link = panel.drill_link().map(ToString::to_string);
    let mut entries = vec![PanelMenuEntry {
        action: PanelAction::DrillLink,
        disabled: link.is_none(),
        href: link,
    }];
    if !is_preview {
        entries.extend(
            [
                PanelAction::Edit,
                PanelAction::Clone,
                PanelAction::Share,
                PanelAction::Delete,
            ]
            .into_iter()
            .map(|action| PanelMenuEntry {
                action,
                disabled: false,
                href: None,
            }),
        );
    }
    entries
}

/// Optional zero-argument callbacks wired to the editing actions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelCallbacks {
    /// Clone handler.
    pub on_clone: Option<Callback<()>>,
    /// Share handler.
    pub on_share: Option<Callback<()>>,
    /// Edit handler.
    pub on_edit: Option<Callback<()>>,
    /// Delete handler.
    pub on_delete: Option<Callback<()>>,
}

impl PanelCallbacks {
    /// Invoke the callback bound to `action`, if any. Returns whether one ran.
    pub fn dispatch(&self, action: PanelAction) -> bool {
        let callback = match action {
            PanelAction::DrillLink => None,
            PanelAction::Edit => self.on_edit.as_ref(),
            PanelAction::Clone => self.on_clone.as_ref(),
            PanelAction::Share => self.on_share.as_ref(),
            PanelAction::Delete => self.on_delete.as_ref(),
        };
        callback.map(|callback| callback.emit(())).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PanelTarget;
    use std::cell::Cell;
    use std::rc::Rc;

    fn configured_panel() -> Panel {
        Panel {
            id: "p1".to_string(),
            name: "CPU".to_string(),
            kind: "timeseries".to_string(),
            targets: vec![PanelTarget {
                ref_id: "A".to_string(),
                expr: "up".to_string(),
                legend: None,
            }],
            ..Panel::default()
        }
    }

    #[test]
    fn known_tags_select_their_own_strategy() {
        let panel = configured_panel();
        for kind in ChartKind::all() {
            assert_eq!(PanelBody::resolve(Some(&panel), kind.tag()), PanelBody::Chart(kind));
        }
    }

    #[test]
    fn unknown_tag_renders_message_with_the_tag() {
        let panel = configured_panel();
        let body = PanelBody::resolve(Some(&panel), "heatmap");
        assert_eq!(body, PanelBody::Invalid("Invalid chart type heatmap".to_string()));
        assert!(!matches!(body, PanelBody::Chart(_)));
        assert_eq!(ChartKind::from_tag("Stat"), None);
    }

    #[test]
    fn blank_or_missing_configuration_renders_nothing() {
        let blank: Panel = serde_json::from_str("{}").expect("blank panel");
        assert!(PanelBody::resolve(Some(&blank), "stat").is_empty());
        assert!(PanelBody::resolve(None, "stat").is_empty());
        assert!(PanelBody::resolve(None, "bogus").is_empty());
    }

    #[test]
    fn late_panel_flips_the_container_attachment() {
        let before = PanelBody::resolve(None, "timeseries");
        let panel = configured_panel();
        let after = PanelBody::resolve(Some(&panel), "timeseries");
        assert_ne!(before.is_empty(), after.is_empty());
        assert!(!after.is_empty());
        assert!(!fetch_enabled(false, false));
        assert!(fetch_enabled(false, !after.is_empty()));
    }

    #[test]
    fn preview_always_enables_fetching() {
        assert!(fetch_enabled(true, false));
        assert!(fetch_enabled(true, true));
        assert!(fetch_enabled(false, true));
        assert!(!fetch_enabled(false, false));
    }

    #[test]
    fn preview_menu_only_offers_the_link() {
        let mut panel = configured_panel();
        panel.link = Some("https://grafana.example/d/1".to_string());
        let menu = panel_menu(&panel, true);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].action, PanelAction::DrillLink);
        assert!(!menu[0].disabled);
        assert_eq!(menu[0].href.as_deref(), Some("https://grafana.example/d/1"));
    }

    #[test]
    fn full_menu_disables_missing_link() {
        let menu = panel_menu(&configured_panel(), false);
        let actions: Vec<_> = menu.iter().map(|entry| entry.action).collect();
        assert_eq!(
            actions,
            vec![
                PanelAction::DrillLink,
                PanelAction::Edit,
                PanelAction::Clone,
                PanelAction::Share,
                PanelAction::Delete,
            ]
        );
        assert!(menu[0].disabled);
        assert!(menu[1..].iter().all(|entry| !entry.disabled));
    }

    #[test]
    fn each_action_invokes_only_its_callback_once() {
        let counters: [Rc<Cell<u32>>; 4] = Default::default();
        let make = |counter: &Rc<Cell<u32>>| {
            let counter = Rc::clone(counter);
            Some(Callback::from(move |()| counter.set(counter.get() + 1)))
        };
        let callbacks = PanelCallbacks {
            on_edit: make(&counters[0]),
            on_clone: make(&counters[1]),
            on_share: make(&counters[2]),
            on_delete: make(&counters[3]),
        };
        let actions = [
            PanelAction::Edit,
            PanelAction::Clone,
            PanelAction::Share,
            PanelAction::Delete,
        ];
        for (index, action) in actions.into_iter().enumerate() {
            let before: Vec<u32> = counters.iter().map(|c| c.get()).collect();
            assert!(callbacks.dispatch(action));
            for (other, counter) in counters.iter().enumerate() {
                let expected = before[other] + u32::from(other == index);
                assert_eq!(counter.get(), expected);
            }
        }
        assert!(!callbacks.dispatch(PanelAction::DrillLink));
    }

    #[test]
    fn missing_callbacks_are_ignored() {
        assert!(!PanelCallbacks::default().dispatch(PanelAction::Delete));
    }
}
