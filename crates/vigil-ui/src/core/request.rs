//! Request bookkeeping for fetch-on-change views.
//!
//! # Design
//! - Every request gets a ticket tagged with a generation number.
//! - Only the ticket of the latest generation may commit its result; older
//!   responses are discarded when they settle.
//! - The loading flag tracks the latest generation only.

/// Ticket handed to an in-flight request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTicket<K> {
    generation: u64,
    key: K,
}

impl<K> RequestTicket<K> {
    /// Key the request was issued for.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }
}

/// Tracks the latest issued request and whether it is still in flight.
#[derive(Clone, Debug)]
pub struct RequestTracker<K> {
    generation: u64,
    in_flight: bool,
    last_seen: Option<K>,
}

impl<K> Default for RequestTracker<K> {
    fn default() -> Self {
        Self {
            generation: 0,
            in_flight: false,
            last_seen: None,
        }
    }
}

impl<K: Clone + PartialEq> RequestTracker<K> {
    /// Issue a ticket unconditionally, superseding any in-flight request.
    pub fn issue(&mut self, key: K) -> RequestTicket<K> {
        self.generation += 1;
        self.in_flight = true;
        self.last_seen = Some(key.clone());
        RequestTicket {
            generation: self.generation,
            key,
        }
    }

    /// Issue a ticket only when `key` is defined and differs from the last key seen.
    ///
    /// An undefined key is remembered (so the same key reappearing later is a
    /// change) but never supersedes a request that is already in flight.
    pub fn issue_if_changed(&mut self, key: Option<K>) -> Option<RequestTicket<K>> {
        if key == self.last_seen {
            return None;
        }
        match key {
            Some(key) => Some(self.issue(key)),
            None => {
                self.last_seen = None;
                None
            }
        }
    }

    /// Whether `ticket` belongs to the latest generation.
    #[must_use]
    pub fn is_current(&self, ticket: &RequestTicket<K>) -> bool {
        ticket.generation == self.generation
    }

    /// Mark `ticket` as settled. Returns `true` when it was the latest request.
    pub fn settle(&mut self, ticket: &RequestTicket<K>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Whether the latest request has not settled yet.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }
}

/// Result of settling a ticket against a [`FetchModel`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettleOutcome<E> {
    /// The response was the latest and has been committed.
    Applied,
    /// The latest request failed; the previous value is kept.
    Failed(E),
    /// A newer request superseded this one; nothing changed.
    Discarded,
}

/// Value plus request bookkeeping for a view that fetches on change.
#[derive(Clone, Debug)]
pub struct FetchModel<K, T> {
    tracker: RequestTracker<K>,
    value: T,
}

impl<K, T: Default> Default for FetchModel<K, T> {
    fn default() -> Self {
        Self {
            tracker: RequestTracker::default(),
            value: T::default(),
        }
    }
}

impl<K: Clone + PartialEq, T> FetchModel<K, T> {
    /// Start with an explicit initial value.
    pub fn new(value: T) -> Self {
        Self {
            tracker: RequestTracker::default(),
            value,
        }
    }

    /// Issue a request unconditionally.
    pub fn request(&mut self, key: K) -> RequestTicket<K> {
        self.tracker.issue(key)
    }

    /// Issue a request when the key is defined and changed.
    pub fn request_if_changed(&mut self, key: Option<K>) -> Option<RequestTicket<K>> {
        self.tracker.issue_if_changed(key)
    }

    /// Settle a request with its result.
    pub fn settle<E>(&mut self, ticket: &RequestTicket<K>, result: Result<T, E>) -> SettleOutcome<E> {
        if !self.tracker.settle(ticket) {
            return SettleOutcome::Discarded;
        }
        match result {
            Ok(value) => {
                self.value = value;
                SettleOutcome::Applied
            }
            Err(err) => SettleOutcome::Failed(err),
        }
    }

    /// Last committed value.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Committed value for local edits.
    pub const fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Whether the latest request is in flight.
    pub const fn loading(&self) -> bool {
        self.tracker.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_if_changed_fires_once_per_distinct_key() {
        let mut tracker = RequestTracker::default();
        assert!(tracker.issue_if_changed(Some("7")).is_some());
        assert!(tracker.issue_if_changed(Some("7")).is_none());
        assert!(tracker.issue_if_changed(Some("8")).is_some());
        assert!(tracker.issue_if_changed(Some("8")).is_none());
    }

    #[test]
    fn undefined_key_never_issues() {
        let mut tracker = RequestTracker::<String>::default();
        assert!(tracker.issue_if_changed(None).is_none());
        assert!(!tracker.is_loading());
    }

    #[test]
    fn key_reappearing_after_undefined_is_a_change() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue_if_changed(Some(1)).expect("first ticket");
        assert!(tracker.issue_if_changed(None).is_none());
        assert!(tracker.is_loading());
        assert!(tracker.settle(&first));
        assert!(tracker.issue_if_changed(Some(1)).is_some());
    }

    #[test]
    fn loading_spans_issue_to_settlement() {
        let mut model: FetchModel<u32, Vec<u32>> = FetchModel::default();
        assert!(!model.loading());
        let ticket = model.request(1);
        assert!(model.loading());
        assert_eq!(model.settle::<()>(&ticket, Ok(vec![1])), SettleOutcome::Applied);
        assert!(!model.loading());
        assert_eq!(model.value(), &vec![1]);
    }

    #[test]
    fn failure_clears_loading_and_keeps_previous_value() {
        let mut model = FetchModel::new(vec![5_u32]);
        let ticket = model.request(2_u32);
        assert!(model.loading());
        assert_eq!(
            model.settle(&ticket, Err("timeout")),
            SettleOutcome::Failed("timeout")
        );
        assert!(!model.loading());
        assert_eq!(model.value(), &vec![5]);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut model: FetchModel<&str, String> = FetchModel::default();
        let old = model.request("a");
        let new = model.request("b");
        assert_eq!(
            model.settle::<()>(&old, Ok("stale".to_string())),
            SettleOutcome::Discarded
        );
        assert!(model.loading());
        assert_eq!(model.value(), "");
        assert_eq!(
            model.settle::<()>(&new, Ok("fresh".to_string())),
            SettleOutcome::Applied
        );
        assert!(!model.loading());
        assert_eq!(model.value(), "fresh");
        assert_eq!(new.key(), &"b");
    }
}
