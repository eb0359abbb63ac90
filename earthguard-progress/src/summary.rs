//! Profile summary derivation for the presentation layer.

use crate::badges::level_for_points;
use crate::constants::POINTS_PER_TREE;
use crate::state::ProgressState;

/// Derived figures shown on the profile screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub level: u32,
    pub points: u32,
    pub streak: u32,
    /// Missions completed since the last rollover.
    pub completed_today: usize,
    /// Lifetime completions across every mission.
    pub total_completions: u64,
    /// Point total expressed as trees saved (one tree per 20 points).
    pub trees_saved: f32,
}

/// Compute the profile summary for the current state.
#[must_use]
pub fn profile_summary(state: &ProgressState) -> ProfileSummary {
    #[allow(clippy::cast_precision_loss)]
    let trees_saved = state.points as f32 / POINTS_PER_TREE as f32;
    ProfileSummary {
        level: level_for_points(state.points),
        points: state.points,
        streak: state.streak,
        completed_today: state.today_completed_missions.len(),
        total_completions: state.total_completions(),
        trees_saved,
    }
}
