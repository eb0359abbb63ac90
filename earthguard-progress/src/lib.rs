//! EarthGuardian Progress Engine
//!
//! Platform-agnostic state core for the EarthGuardian daily eco-mission
//! tracker. This crate provides point accumulation, per-mission completion
//! counters, daily reset and streak calculation, badge/level derivation,
//! and durable persistence of the progress aggregate, without UI or
//! platform-specific dependencies.
//!
//! Hosts inject a [`Clock`], a [`ProgressStore`], and a [`CatalogSource`],
//! hydrate the engine once at startup, run the rollover check on every
//! foreground event, and issue commands in response to user actions.

pub mod badges;
pub mod catalog;
pub mod clock;
pub mod constants;
pub mod engine;
pub mod persist;
pub mod state;
pub mod streak;
pub mod summary;

// Re-export commonly used types
pub use badges::level_for_points;
pub use catalog::{
    Badge, BadgeCatalog, CatalogError, Mission, MissionCatalog, MissionCategory, MissionId,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::{POINTS_PER_LEVEL, POINTS_PER_TREE, STORAGE_KEY};
pub use engine::{DuplicatePolicy, MissionReward, ProgressEngine, ProgressError};
pub use persist::{MemoryStore, Persister, ProgressStore};
pub use state::{ProgressSnapshot, ProgressState, TodayCompletions};
pub use streak::next_streak;
pub use summary::{ProfileSummary, profile_summary};

/// Trait for abstracting catalog loading.
///
/// Platform-specific implementations should provide this; catalogs are
/// static data supplied at startup and never persisted.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the mission catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or fails validation.
    fn load_missions(&self) -> Result<MissionCatalog, Self::Error>;

    /// Load the badge ladder, pre-sorted ascending by threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or fails validation.
    fn load_badges(&self) -> Result<BadgeCatalog, Self::Error>;
}

impl<C, S> ProgressEngine<C, S>
where
    C: Clock,
    S: ProgressStore,
{
    /// Construct an engine with catalogs from the given source.
    ///
    /// The engine is returned un-hydrated; call
    /// [`hydrate`](ProgressEngine::hydrate) before issuing commands.
    ///
    /// # Errors
    ///
    /// Returns an error if either catalog cannot be loaded.
    pub fn bootstrap<L>(
        source: &L,
        clock: C,
        store: S,
        policy: DuplicatePolicy,
    ) -> Result<Self, L::Error>
    where
        L: CatalogSource,
    {
        let missions = source.load_missions()?;
        let badges = source.load_badges()?;
        Ok(Self::new(clock, store, missions, badges, policy))
    }
}
