//! The daily progress state engine.
//!
//! Owns the in-memory aggregate, applies commands against it, and submits
//! a full snapshot to storage after every mutation. Hosts construct one
//! engine at startup, hydrate it once, and run the rollover check on every
//! foreground/resume event.

use chrono::NaiveDate;
use thiserror::Error;

use crate::badges::level_for_points;
use crate::catalog::{Badge, BadgeCatalog, MissionCatalog, MissionId};
use crate::clock::Clock;
use crate::persist::{Persister, ProgressStore};
use crate::state::ProgressState;
use crate::streak::next_streak;
use crate::summary::{ProfileSummary, profile_summary};

/// How a second completion of the same mission on the same day is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Reject the repeat with [`ProgressError::AlreadyCompletedToday`].
    #[default]
    RejectSameDay,
    /// Accept the repeat: the day list and the stats both grow again.
    Repeatable,
}

/// Validation errors returned by mutation commands.
///
/// Storage failures never surface here; they are logged and swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    #[error("progress has not been hydrated yet")]
    NotHydrated,
    #[error("point awards must be positive")]
    ZeroPointAward,
    #[error("unknown mission id {0}")]
    UnknownMission(MissionId),
    #[error("mission {0} was already completed today")]
    AlreadyCompletedToday(MissionId),
}

/// Outcome of an orchestrated mission completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionReward {
    pub mission_id: MissionId,
    pub points_awarded: u32,
    /// Set when the award crossed a badge threshold.
    pub unlocked_badge: Option<Badge>,
}

/// Progress state engine generic over its clock and storage.
pub struct ProgressEngine<C, S> {
    clock: C,
    persister: Persister<S>,
    missions: MissionCatalog,
    badges: BadgeCatalog,
    policy: DuplicatePolicy,
    state: ProgressState,
    hydrated: bool,
}

impl<C, S> ProgressEngine<C, S>
where
    C: Clock,
    S: ProgressStore,
{
    /// Create an engine with zero-valued state anchored to today.
    ///
    /// Call [`hydrate`](Self::hydrate) before issuing commands.
    #[must_use]
    pub fn new(
        clock: C,
        store: S,
        missions: MissionCatalog,
        badges: BadgeCatalog,
        policy: DuplicatePolicy,
    ) -> Self {
        let state = ProgressState::fresh(clock.today());
        Self {
            clock,
            persister: Persister::new(store),
            missions,
            badges,
            policy,
            state,
            hydrated: false,
        }
    }

    /// Load persisted progress, then reconcile any rollover that happened
    /// while the process was not running.
    ///
    /// Absent, unreadable, or corrupt storage leaves the zero-valued
    /// defaults in place. Always terminates with the engine hydrated;
    /// repeated calls are ignored.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        if let Some(snapshot) = self.persister.load() {
            self.state = ProgressState::from_snapshot(snapshot, self.clock.today());
            self.hydrated = true;
            self.check_and_reset_daily();
        } else {
            self.hydrated = true;
        }
    }

    /// Roll the state over to today if the calendar day has changed.
    ///
    /// Recomputes the streak from the old date and the old day's activity,
    /// clears the daily completion list, and persists. Idempotent once the
    /// stored date matches today; hosts call this on every resume.
    pub fn check_and_reset_daily(&mut self) {
        let today = self.clock.today();
        if self.state.last_active_date == today {
            return;
        }
        let streak = next_streak(
            self.state.last_active_date,
            today,
            self.state.active_today(),
            self.state.streak,
        );
        log::info!(
            "daily rollover {} -> {} (streak {})",
            self.state.last_active_date,
            today,
            streak
        );
        self.state.last_active_date = today;
        self.state.today_completed_missions.clear();
        self.state.streak = streak;
        self.persist();
    }

    /// Add points to the lifetime total.
    ///
    /// # Errors
    ///
    /// Rejects a zero amount and commands issued before hydration.
    pub fn add_points(&mut self, amount: u32) -> Result<(), ProgressError> {
        self.ensure_hydrated()?;
        if amount == 0 {
            return Err(ProgressError::ZeroPointAward);
        }
        self.state.points = self.state.points.saturating_add(amount);
        self.persist();
        Ok(())
    }

    /// Record a mission completion for today.
    ///
    /// Appends to the daily list and increments the lifetime counter.
    /// Does not award points; see [`complete_and_reward`](Self::complete_and_reward).
    ///
    /// # Errors
    ///
    /// Rejects unknown mission ids, same-day repeats under
    /// [`DuplicatePolicy::RejectSameDay`], and commands issued before
    /// hydration.
    pub fn complete_mission(&mut self, id: MissionId) -> Result<(), ProgressError> {
        self.ensure_hydrated()?;
        if !self.missions.contains(id) {
            return Err(ProgressError::UnknownMission(id));
        }
        if self.policy == DuplicatePolicy::RejectSameDay
            && self.state.today_completed_missions.contains(&id)
        {
            return Err(ProgressError::AlreadyCompletedToday(id));
        }
        self.state.today_completed_missions.push(id);
        let count = self.state.mission_stats.entry(id).or_insert(0);
        *count = count.saturating_add(1);
        self.persist();
        Ok(())
    }

    /// Complete a mission, award its points, and report a badge unlock.
    ///
    /// This is the full completion flow the app runs when the player taps a
    /// mission card: record the completion, grant the catalog reward, and
    /// check whether the award crossed a badge threshold.
    ///
    /// # Errors
    ///
    /// Same conditions as [`complete_mission`](Self::complete_mission).
    pub fn complete_and_reward(&mut self, id: MissionId) -> Result<MissionReward, ProgressError> {
        self.ensure_hydrated()?;
        let points = self
            .missions
            .find(id)
            .ok_or(ProgressError::UnknownMission(id))?
            .points;
        let before = self.state.points;
        self.complete_mission(id)?;
        self.add_points(points)?;
        let unlocked_badge = self.badges.newly_unlocked(before, self.state.points).cloned();
        Ok(MissionReward {
            mission_id: id,
            points_awarded: points,
            unlocked_badge,
        })
    }

    // Queries --------------------------------------------------------------

    /// Whether the initial load attempt has completed.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Read-only view of the live aggregate.
    #[must_use]
    pub const fn state(&self) -> &ProgressState {
        &self.state
    }

    #[must_use]
    pub const fn points(&self) -> u32 {
        self.state.points
    }

    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.state.streak
    }

    #[must_use]
    pub const fn last_active_date(&self) -> NaiveDate {
        self.state.last_active_date
    }

    /// Level derived from the current point total.
    #[must_use]
    pub const fn level(&self) -> u32 {
        level_for_points(self.state.points)
    }

    /// The badge the player is currently working toward.
    #[must_use]
    pub fn next_badge(&self) -> Option<&Badge> {
        self.badges.next_badge(self.state.points)
    }

    /// Lifetime completions across every mission.
    #[must_use]
    pub fn total_completions(&self) -> u64 {
        self.state.total_completions()
    }

    /// Whether the mission was completed since the last rollover.
    #[must_use]
    pub fn completed_today(&self, id: MissionId) -> bool {
        self.state.today_completed_missions.contains(&id)
    }

    /// Derived figures for the profile screen.
    #[must_use]
    pub fn profile_summary(&self) -> ProfileSummary {
        profile_summary(&self.state)
    }

    #[must_use]
    pub const fn mission_catalog(&self) -> &MissionCatalog {
        &self.missions
    }

    #[must_use]
    pub const fn badge_catalog(&self) -> &BadgeCatalog {
        &self.badges
    }

    // Internals ------------------------------------------------------------

    const fn ensure_hydrated(&self) -> Result<(), ProgressError> {
        if self.hydrated {
            Ok(())
        } else {
            Err(ProgressError::NotHydrated)
        }
    }

    /// Submit a full snapshot of the live state.
    fn persist(&self) {
        self.persister.submit(&self.state.snapshot());
    }
}
