//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Business-group selection is the only cross-page state; pages read it
//!   through selectors and pass the id into their fetches explicitly.

use crate::models::BusinessGroup;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Business groups and the current selection.
    pub business: BusinessSlice,
}

/// Business-group list plus the selected group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusinessSlice {
    /// Groups visible to the current user.
    pub groups: Vec<BusinessGroup>,
    /// Selected group id, when one is known.
    pub current: Option<i64>,
    /// Whether the group list has been loaded at least once.
    pub loaded: bool,
}

/// Replace the group list and pick a selection.
///
/// The preferred id (usually the persisted one) wins when it is still in the
/// list; otherwise the first group is selected.
pub fn set_business_groups(
    slice: &mut BusinessSlice,
    groups: Vec<BusinessGroup>,
    preferred: Option<i64>,
) {
    let keep = preferred
        .or(slice.current)
        .filter(|id| groups.iter().any(|group| group.id == *id));
    slice.current = keep.or_else(|| groups.first().map(|group| group.id));
    slice.groups = groups;
    slice.loaded = true;
}

/// Select a group by id. Unknown ids are ignored; returns whether the
/// selection changed.
pub fn select_business_group(slice: &mut BusinessSlice, id: i64) -> bool {
    if slice.current == Some(id) || !slice.groups.iter().any(|group| group.id == id) {
        return false;
    }
    slice.current = Some(id);
    true
}

/// Whether the group list arrived without yielding a selection.
#[must_use]
pub const fn select_missing_group(store: &AppStore) -> bool {
    store.business.loaded && store.business.current.is_none()
}

/// Selector for the current group id.
#[must_use]
pub const fn select_current_group_id(store: &AppStore) -> Option<i64> {
    store.business.current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: i64, name: &str) -> BusinessGroup {
        BusinessGroup {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn persisted_selection_is_restored_when_present() {
        let mut slice = BusinessSlice::default();
        set_business_groups(&mut slice, vec![group(1, "ops"), group(2, "db")], Some(2));
        assert_eq!(slice.current, Some(2));
        assert!(slice.loaded);
    }

    #[test]
    fn stale_selection_falls_back_to_first_group() {
        let mut slice = BusinessSlice::default();
        set_business_groups(&mut slice, vec![group(3, "web"), group(4, "mq")], Some(9));
        assert_eq!(slice.current, Some(3));
    }

    #[test]
    fn empty_list_clears_selection() {
        let mut slice = BusinessSlice {
            groups: vec![group(1, "ops")],
            current: Some(1),
            loaded: true,
        };
        set_business_groups(&mut slice, Vec::new(), Some(1));
        assert_eq!(slice.current, None);
        assert!(slice.loaded);
    }

    #[test]
    fn selecting_unknown_or_same_group_is_a_no_op() {
        let mut store = AppStore::default();
        set_business_groups(&mut store.business, vec![group(1, "ops"), group(2, "db")], None);
        assert!(!select_business_group(&mut store.business, 1));
        assert!(!select_business_group(&mut store.business, 7));
        assert!(select_business_group(&mut store.business, 2));
        assert_eq!(select_current_group_id(&store), Some(2));
    }

    #[test]
    fn missing_group_is_reported_only_after_loading() {
        let mut store = AppStore::default();
        assert!(!select_missing_group(&store));
        set_business_groups(&mut store.business, Vec::new(), None);
        assert!(select_missing_group(&store));
        set_business_groups(&mut store.business, vec![group(5, "ops")], None);
        assert!(!select_missing_group(&store));
    }
}
