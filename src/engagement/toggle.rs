//! # Toggle Protocol
//!
//! One idempotent-intent operation over a join relation: create the record
//! if absent, delete it if present. Used by like/unlike and
//! subscribe/unsubscribe.
//!
//! The lookup-then-act pair is not atomic on its own, so the protocol
//! leans on two store guarantees to stay race-free:
//! - `insert` enforces a uniqueness constraint on the key and fails with
//!   `Duplicate` when the record already exists; the protocol collapses
//!   that onto the remove branch.
//! - `remove` of an absent record is a no-op success (`Ok(false)`), never
//!   a fault.
//!
//! Sequential toggles with the same key therefore strictly alternate
//! between `Added` and `Removed`.

use crate::store::{StoreError, StoreResult};

/// Store interface for a join relation keyed by (actor, target)
pub trait JoinStore: Send + Sync {
    /// Composite key identifying one join record
    type Key: Copy;

    /// The join record itself
    type Record: Clone;

    /// Look up the record for a key
    fn find(&self, key: Self::Key) -> StoreResult<Option<Self::Record>>;

    /// Create the record for a key; `Duplicate` if it already exists
    fn insert(&self, key: Self::Key) -> StoreResult<Self::Record>;

    /// Delete the record for a key; `Ok(false)` if it was already absent
    fn remove(&self, key: Self::Key) -> StoreResult<bool>;
}

/// Outcome of one toggle call
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome<R> {
    /// The join record was created; carries the new record
    Added(R),

    /// The join record was deleted
    Removed,
}

impl<R> ToggleOutcome<R> {
    pub fn was_added(&self) -> bool {
        matches!(self, ToggleOutcome::Added(_))
    }
}

/// Execute the toggle protocol for one key
pub fn toggle<S: JoinStore>(store: &S, key: S::Key) -> StoreResult<ToggleOutcome<S::Record>> {
    match store.find(key)? {
        Some(_) => {
            store.remove(key)?;
            Ok(ToggleOutcome::Removed)
        }
        None => match store.insert(key) {
            Ok(record) => Ok(ToggleOutcome::Added(record)),
            // A concurrent toggle won the insert; treat as "already present"
            Err(StoreError::Duplicate(_)) => {
                store.remove(key)?;
                Ok(ToggleOutcome::Removed)
            }
            Err(e) => Err(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::RwLock;

    /// Minimal join store over plain u64 keys
    #[derive(Default)]
    struct TestJoinStore {
        keys: RwLock<Vec<u64>>,
        fail_inserts_as_duplicate: bool,
    }

    impl JoinStore for TestJoinStore {
        type Key = u64;
        type Record = u64;

        fn find(&self, key: u64) -> StoreResult<Option<u64>> {
            let keys = self.keys.read().map_err(|_| StoreError::poisoned())?;
            Ok(keys.iter().find(|k| **k == key).copied())
        }

        fn insert(&self, key: u64) -> StoreResult<u64> {
            if self.fail_inserts_as_duplicate {
                return Err(StoreError::Duplicate("already present".to_string()));
            }
            let mut keys = self.keys.write().map_err(|_| StoreError::poisoned())?;
            if keys.contains(&key) {
                return Err(StoreError::Duplicate("already present".to_string()));
            }
            keys.push(key);
            Ok(key)
        }

        fn remove(&self, key: u64) -> StoreResult<bool> {
            let mut keys = self.keys.write().map_err(|_| StoreError::poisoned())?;
            let len_before = keys.len();
            keys.retain(|k| *k != key);
            Ok(keys.len() != len_before)
        }
    }

    #[test]
    fn test_toggle_alternates() {
        let store = TestJoinStore::default();

        assert!(toggle(&store, 7).unwrap().was_added());
        assert!(!toggle(&store, 7).unwrap().was_added());
        assert!(toggle(&store, 7).unwrap().was_added());
        assert!(!toggle(&store, 7).unwrap().was_added());

        // Record existence matches the last outcome
        assert!(store.find(7).unwrap().is_none());
    }

    #[test]
    fn test_independent_keys() {
        let store = TestJoinStore::default();

        assert!(toggle(&store, 1).unwrap().was_added());
        assert!(toggle(&store, 2).unwrap().was_added());
        assert!(!toggle(&store, 1).unwrap().was_added());

        assert!(store.find(1).unwrap().is_none());
        assert!(store.find(2).unwrap().is_some());
    }

    #[test]
    fn test_duplicate_insert_collapses_to_remove() {
        // Simulates losing the insert race: find saw nothing, insert hits
        // the uniqueness constraint
        let store = TestJoinStore {
            fail_inserts_as_duplicate: true,
            ..Default::default()
        };

        let outcome = toggle(&store, 42).unwrap();
        assert_eq!(outcome, ToggleOutcome::Removed);
    }

    #[test]
    fn test_remove_of_absent_is_no_op() {
        let store = TestJoinStore::default();
        assert!(!store.remove(99).unwrap());
    }
}
