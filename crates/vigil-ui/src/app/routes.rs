//! Routing definitions for the Vigil console.
use yew_router::prelude::*;

/// Console routes.
#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub enum Route {
    /// Landing page; redirects to the dashboards index.
    #[at("/")]
    Home,
    /// Dashboards index.
    #[at("/dashboards")]
    Dashboards,
    /// A single dashboard.
    #[at("/dashboards/:id")]
    Dashboard {
        /// Board id.
        id: String,
    },
    /// One panel of a dashboard, rendered in preview mode.
    #[at("/dashboards/:id/share/:panel_id")]
    SharedPanel {
        /// Board id.
        id: String,
        /// Panel id.
        panel_id: String,
    },
    /// Panel editor.
    #[at("/dashboards/:id/edit/:panel_id")]
    PanelEditor {
        /// Board id.
        id: String,
        /// Panel id.
        panel_id: String,
    },
    /// Task list.
    #[at("/job-tasks")]
    Tasks,
    /// Task creation form; `?task=<id>` clones an existing task.
    #[at("/job-tasks/add")]
    TaskAdd,
    /// Task detail.
    #[at("/job-tasks/:id/detail")]
    TaskDetail {
        /// Task id.
        id: String,
    },
    /// Fallback for unknown paths.
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_navigation_paths() {
        assert_eq!(Route::Tasks.to_path(), "/job-tasks");
        assert_eq!(Route::TaskAdd.to_path(), "/job-tasks/add");
        assert_eq!(
            Route::TaskDetail { id: "42".to_string() }.to_path(),
            "/job-tasks/42/detail"
        );
    }

    #[test]
    fn dashboard_paths_round_trip() {
        let share = Route::SharedPanel {
            id: "7".to_string(),
            panel_id: "abc".to_string(),
        };
        assert_eq!(share.to_path(), "/dashboards/7/share/abc");
        assert_eq!(Route::recognize("/dashboards/7/share/abc"), Some(share));
        assert_eq!(
            Route::recognize("/job-tasks/9/detail"),
            Some(Route::TaskDetail { id: "9".to_string() })
        );
    }
}
