//! Durable persistence seam.
//!
//! Storage is best-effort: read failures hydrate as "no prior state" and
//! write failures are logged and swallowed, leaving the in-memory state
//! authoritative. Each submitted write serializes the state handed to it
//! at that moment, so a snapshot can never trail the state it describes,
//! and a dropped write is reconciled by the next full-snapshot write.

use crate::constants::STORAGE_KEY;
use crate::state::ProgressSnapshot;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Trait for abstracting key-value progress storage.
///
/// Platform-specific implementations should provide this.
pub trait ProgressStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `blob` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set(&self, key: &str, blob: &str) -> Result<(), Self::Error>;
}

/// Writes progress snapshots through a [`ProgressStore`].
///
/// Owns the storage key and the wire schema; callers only ever hand it the
/// live state.
#[derive(Debug)]
pub struct Persister<S> {
    store: S,
}

impl<S: ProgressStore> Persister<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the stored snapshot, treating every failure as absence.
    #[must_use]
    pub fn load(&self) -> Option<ProgressSnapshot> {
        let blob = match self.store.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("failed to read saved progress: {err}");
                return None;
            }
        };
        match ProgressSnapshot::from_json(&blob) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("discarding unreadable progress snapshot: {err}");
                None
            }
        }
    }

    /// Write a full snapshot, swallowing (but logging) any failure.
    pub fn submit(&self, snapshot: &ProgressSnapshot) {
        let blob = match snapshot.to_json() {
            Ok(blob) => blob,
            Err(err) => {
                log::error!("failed to serialize progress snapshot: {err}");
                return;
            }
        };
        if let Err(err) = self.store.set(STORAGE_KEY, &blob) {
            log::warn!("failed to write progress snapshot: {err}");
        }
    }
}

/// In-memory store backed by a shared map.
///
/// Clones share the same storage, so a test can keep a handle and inspect
/// what the engine wrote. Also serves as the store for ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The blob currently stored under the progress key, if any.
    #[must_use]
    pub fn progress_blob(&self) -> Option<String> {
        self.slots.borrow().get(STORAGE_KEY).cloned()
    }
}

impl ProgressStore for MemoryStore {
    type Error = std::convert::Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), Self::Error> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::state::ProgressState;

    #[derive(Debug, thiserror::Error)]
    #[error("storage offline")]
    struct Offline;

    struct BrokenStore;

    impl ProgressStore for BrokenStore {
        type Error = Offline;

        fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
            Err(Offline)
        }

        fn set(&self, _key: &str, _blob: &str) -> Result<(), Self::Error> {
            Err(Offline)
        }
    }

    fn sample_snapshot() -> ProgressSnapshot {
        let mut state = ProgressState::fresh(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        state.points = 77;
        state.snapshot()
    }

    #[test]
    fn submit_then_load_round_trips() {
        let store = MemoryStore::new();
        let persister = Persister::new(store.clone());
        let snapshot = sample_snapshot();

        persister.submit(&snapshot);
        assert_eq!(persister.load(), Some(snapshot));
        assert!(store.progress_blob().is_some());
    }

    #[test]
    fn later_submissions_supersede_earlier_ones() {
        let store = MemoryStore::new();
        let persister = Persister::new(store.clone());

        let mut snapshot = sample_snapshot();
        persister.submit(&snapshot);
        snapshot.points = 200;
        persister.submit(&snapshot);

        assert_eq!(persister.load().unwrap().points, 200);
    }

    #[test]
    fn read_failures_load_as_absent() {
        let persister = Persister::new(BrokenStore);
        assert_eq!(persister.load(), None);
    }

    #[test]
    fn corrupt_blobs_load_as_absent() {
        let store = MemoryStore::new();
        store.set(STORAGE_KEY, "{{ not json").unwrap();
        assert_eq!(Persister::new(store).load(), None);
    }

    #[test]
    fn write_failures_are_swallowed() {
        let persister = Persister::new(BrokenStore);
        persister.submit(&sample_snapshot());
    }
}
