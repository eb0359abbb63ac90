//! The persisted progress aggregate and its wire snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::MissionId;

/// Missions completed since the last daily reset.
///
/// Duplicates are permitted by the structure; whether they are accepted is
/// decided by the engine's duplicate policy.
pub type TodayCompletions = SmallVec<[MissionId; 8]>;

/// Live in-memory progress aggregate.
///
/// Only the fields below survive a restart; the hydration flag is runtime
/// state owned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    /// Lifetime points. Only ever increased.
    pub points: u32,
    /// Consecutive active days.
    pub streak: u32,
    /// Day the state was last touched or rolled over.
    pub last_active_date: NaiveDate,
    /// Missions completed since the last rollover.
    pub today_completed_missions: TodayCompletions,
    /// Lifetime completion count per mission. Never reset.
    pub mission_stats: BTreeMap<MissionId, u32>,
}

impl ProgressState {
    /// Zero-valued state anchored to the given day.
    #[must_use]
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            points: 0,
            streak: 0,
            last_active_date: today,
            today_completed_missions: TodayCompletions::new(),
            mission_stats: BTreeMap::new(),
        }
    }

    /// Rebuild state from a stored snapshot, defaulting missing fields.
    ///
    /// A snapshot written before the date field existed resolves to
    /// `fallback_date` (the current day).
    #[must_use]
    pub fn from_snapshot(snapshot: ProgressSnapshot, fallback_date: NaiveDate) -> Self {
        Self {
            points: snapshot.points,
            streak: snapshot.streak,
            last_active_date: snapshot.last_active_date.unwrap_or(fallback_date),
            today_completed_missions: snapshot.today_completed_missions,
            mission_stats: snapshot.mission_stats,
        }
    }

    /// Capture the wire form of the current state.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            points: self.points,
            streak: self.streak,
            last_active_date: Some(self.last_active_date),
            today_completed_missions: self.today_completed_missions.clone(),
            mission_stats: self.mission_stats.clone(),
        }
    }

    /// Sum of all lifetime completion counters.
    #[must_use]
    pub fn total_completions(&self) -> u64 {
        self.mission_stats.values().map(|&count| u64::from(count)).sum()
    }

    /// Whether at least one mission was completed since the last rollover.
    #[must_use]
    pub fn active_today(&self) -> bool {
        !self.today_completed_missions.is_empty()
    }
}

/// Serialized form of [`ProgressState`].
///
/// Every field defaults independently so snapshots written by older builds
/// keep loading after the schema grows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub last_active_date: Option<NaiveDate>,
    #[serde(default)]
    pub today_completed_missions: TodayCompletions,
    #[serde(default)]
    pub mission_stats: BTreeMap<MissionId, u32>,
}

impl ProgressSnapshot {
    /// Parse a snapshot from its JSON blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is not valid snapshot JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the snapshot to its JSON blob.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
