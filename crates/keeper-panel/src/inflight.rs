//! Per-row action state.
//!
//! Tracks which record ids currently have an asynchronous mutation in
//! flight, so each row can show its own loading indicator and a second
//! mutation on the same record is rejected instead of racing the first.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use keeper_core::RecordId;

/// The set of record ids with a mutation currently in flight.
///
/// Membership is the critical section: `begin` inserts before the remote
/// call is issued, and dropping the returned guard removes the id after
/// settlement, whatever the outcome. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct InFlightSet {
    inner: Arc<Mutex<HashSet<RecordId>>>,
}

impl InFlightSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an id for a mutation.
    ///
    /// Returns `None` when the id is already mid-flight; the caller must
    /// then reject the action without issuing a remote call.
    pub fn begin(&self, id: &RecordId) -> Option<InFlightGuard> {
        let mut set = self.inner.lock().unwrap();
        if !set.insert(id.clone()) {
            return None;
        }
        Some(InFlightGuard {
            set: Arc::clone(&self.inner),
            id: id.clone(),
        })
    }

    /// Whether a mutation on this id is currently in flight.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.inner.lock().unwrap().contains(id)
    }

    /// All ids currently in flight.
    pub fn ids(&self) -> Vec<RecordId> {
        self.inner.lock().unwrap().iter().cloned().collect()
    }

    /// True when nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}

/// Releases the claimed id when dropped.
///
/// Drop runs on every settlement path, including early returns and
/// cancellation, so an id can never be left stuck in the set.
#[derive(Debug)]
pub struct InFlightGuard {
    set: Arc<Mutex<HashSet<RecordId>>>,
    id: RecordId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().unwrap().remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecordId {
        RecordId::new(s).unwrap()
    }

    #[test]
    fn begin_claims_until_guard_drops() {
        let set = InFlightSet::new();

        let guard = set.begin(&id("42")).expect("first claim succeeds");
        assert!(set.contains(&id("42")));
        assert!(set.begin(&id("42")).is_none());

        drop(guard);
        assert!(!set.contains(&id("42")));
        assert!(set.begin(&id("42")).is_some());
    }

    #[test]
    fn distinct_ids_are_independent() {
        let set = InFlightSet::new();

        let _a = set.begin(&id("42")).unwrap();
        let _b = set.begin(&id("43")).unwrap();

        assert!(set.contains(&id("42")));
        assert!(set.contains(&id("43")));
        assert_eq!(set.ids().len(), 2);
    }

    #[test]
    fn clones_share_the_set() {
        let set = InFlightSet::new();
        let other = set.clone();

        let _guard = set.begin(&id("42")).unwrap();
        assert!(other.contains(&id("42")));
        assert!(other.begin(&id("42")).is_none());
    }
}
