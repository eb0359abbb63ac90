//! Persistence contract: round-trips, forward compatibility, and
//! best-effort behavior against broken stores.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use earthguard_progress::{
    Badge, BadgeCatalog, DuplicatePolicy, FixedClock, MemoryStore, Mission, MissionCatalog,
    MissionCategory, ProgressEngine, ProgressSnapshot, ProgressStore, STORAGE_KEY,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn catalogs() -> (MissionCatalog, BadgeCatalog) {
    let missions = MissionCatalog::from_missions(vec![Mission {
        id: 7,
        category: MissionCategory::Recycle,
        title: "Sort the bins".to_string(),
        points: 25,
    }])
    .unwrap();
    let badges = BadgeCatalog::from_badges(vec![Badge {
        id: "b1".to_string(),
        name: "Recycler".to_string(),
        threshold: 100,
    }])
    .unwrap();
    (missions, badges)
}

fn engine_over<S: ProgressStore>(store: S, today: NaiveDate) -> ProgressEngine<FixedClock, S> {
    let (missions, badges) = catalogs();
    let mut engine = ProgressEngine::new(
        FixedClock::new(today),
        store,
        missions,
        badges,
        DuplicatePolicy::RejectSameDay,
    );
    engine.hydrate();
    engine
}

/// Store that remembers every blob written to it.
#[derive(Clone, Default)]
struct RecordingStore {
    writes: Rc<RefCell<Vec<String>>>,
}

impl ProgressStore for RecordingStore {
    type Error = std::convert::Infallible;

    fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.writes.borrow().last().cloned())
    }

    fn set(&self, _key: &str, blob: &str) -> Result<(), Self::Error> {
        self.writes.borrow_mut().push(blob.to_string());
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("disk full")]
struct DiskFull;

struct FailingStore;

impl ProgressStore for FailingStore {
    type Error = DiskFull;

    fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
        Err(DiskFull)
    }

    fn set(&self, _key: &str, _blob: &str) -> Result<(), Self::Error> {
        Err(DiskFull)
    }
}

#[test]
fn progress_round_trips_across_a_restart() {
    let store = MemoryStore::new();
    {
        let mut engine = engine_over(store.clone(), day(5));
        engine.complete_and_reward(7).unwrap();
        engine.add_points(75).unwrap();
    }

    let engine = engine_over(store, day(5));
    assert_eq!(engine.points(), 100);
    assert!(engine.completed_today(7));
    assert_eq!(engine.state().mission_stats.get(&7), Some(&1));
    assert_eq!(engine.last_active_date(), day(5));
}

#[test]
fn legacy_blobs_with_missing_fields_hydrate_with_defaults() {
    let store = MemoryStore::new();
    store
        .set(STORAGE_KEY, r#"{"points": 240, "streak": 2}"#)
        .unwrap();

    let engine = engine_over(store, day(5));
    assert!(engine.is_hydrated());
    assert_eq!(engine.points(), 240);
    assert_eq!(engine.streak(), 2);
    assert_eq!(engine.last_active_date(), day(5), "missing date becomes today");
    assert!(engine.state().today_completed_missions.is_empty());
    assert!(engine.state().mission_stats.is_empty());
}

#[test]
fn corrupt_blobs_hydrate_as_a_fresh_profile() {
    let store = MemoryStore::new();
    store.set(STORAGE_KEY, "]][[ definitely not json").unwrap();

    let mut engine = engine_over(store, day(5));
    assert!(engine.is_hydrated());
    assert_eq!(engine.points(), 0);
    engine.add_points(10).unwrap();
    assert_eq!(engine.points(), 10);
}

#[test]
fn a_failing_store_never_fails_a_command() {
    let mut engine = engine_over(FailingStore, day(5));
    assert!(engine.is_hydrated());

    engine.complete_and_reward(7).unwrap();
    engine.add_points(5).unwrap();
    assert_eq!(engine.points(), 30, "in-memory state stays authoritative");
}

#[test]
fn every_write_is_a_full_snapshot_of_the_live_state() {
    let store = RecordingStore::default();
    let mut engine = engine_over(store.clone(), day(5));

    engine.add_points(10).unwrap();
    engine.complete_mission(7).unwrap();
    engine.add_points(15).unwrap();

    let writes = store.writes.borrow();
    let snapshots: Vec<ProgressSnapshot> = writes
        .iter()
        .map(|blob| ProgressSnapshot::from_json(blob).unwrap())
        .collect();

    assert_eq!(snapshots.len(), 3);
    assert_eq!(snapshots[0].points, 10);
    assert!(snapshots[0].today_completed_missions.is_empty());
    assert_eq!(snapshots[1].points, 10);
    assert_eq!(snapshots[1].today_completed_missions.as_slice(), &[7]);
    assert_eq!(snapshots[2].points, 25);
    assert_eq!(snapshots[2].today_completed_missions.as_slice(), &[7]);
    assert_eq!(snapshots[2].mission_stats.get(&7), Some(&1));
}

#[test]
fn recovery_after_write_failures_reconciles_on_the_next_write() {
    // First session runs against a dead disk; nothing persists.
    {
        let mut engine = engine_over(FailingStore, day(5));
        engine.add_points(50).unwrap();
    }

    // Second session starts clean on a healthy store and rebuilds from defaults.
    let store = MemoryStore::new();
    let mut engine = engine_over(store.clone(), day(5));
    assert_eq!(engine.points(), 0, "failed writes were lost, not corrupted");
    engine.add_points(20).unwrap();

    let written = ProgressSnapshot::from_json(&store.progress_blob().unwrap()).unwrap();
    assert_eq!(written.points, 20);
}
