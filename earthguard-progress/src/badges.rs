//! Badge and level derivations.
//!
//! Pure lookups over the badge ladder and the current point total. Nothing
//! here mutates or persists state.

use crate::catalog::{Badge, BadgeCatalog};
use crate::constants::POINTS_PER_LEVEL;

/// Level derived from lifetime points. Starts at 1.
#[must_use]
pub const fn level_for_points(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

impl BadgeCatalog {
    /// The badge the player is currently working toward.
    ///
    /// First badge whose threshold exceeds `points`; once everything is
    /// unlocked, the highest badge is returned as the terminal state.
    /// `None` only for an empty catalog.
    #[must_use]
    pub fn next_badge(&self, points: u32) -> Option<&Badge> {
        self.iter()
            .find(|badge| badge.threshold > points)
            .or_else(|| self.last())
    }

    /// Whether the given badge is unlocked at the given point total.
    #[must_use]
    pub fn is_unlocked(badge: &Badge, points: u32) -> bool {
        points >= badge.threshold
    }

    /// Number of badges unlocked at the given point total.
    #[must_use]
    pub fn unlocked_count(&self, points: u32) -> usize {
        self.iter()
            .filter(|badge| Self::is_unlocked(badge, points))
            .count()
    }

    /// The badge newly crossed by raising points from `before` to `after`.
    ///
    /// Returns the first badge with `before < threshold <= after`, matching
    /// how the app decides to show an unlock celebration.
    #[must_use]
    pub fn newly_unlocked(&self, before: u32, after: u32) -> Option<&Badge> {
        self.iter()
            .find(|badge| before < badge.threshold && after >= badge.threshold)
    }
}
