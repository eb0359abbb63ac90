//! Static mission and badge catalogs.
//!
//! Both catalogs are immutable after construction. The badge catalog's
//! ascending-threshold order is load-bearing for "next badge" lookups, so
//! construction rejects unsorted input instead of sorting it.

use serde::{Deserialize, Serialize};

/// Identifier for a mission catalog entry.
pub type MissionId = u32;

/// Category of an eco mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionCategory {
    Water,
    Energy,
    Forest,
    Recycle,
}

impl MissionCategory {
    /// Display name for presentation layers.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Energy => "energy",
            Self::Forest => "forest",
            Self::Recycle => "recycle",
        }
    }
}

/// A single daily mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub category: MissionCategory,
    pub title: String,
    /// Point reward for completing the mission. Must be positive.
    pub points: u32,
}

/// An unlockable badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    /// Cumulative points required to unlock.
    pub threshold: u32,
}

/// Errors detected while constructing a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate mission id {0}")]
    DuplicateMissionId(MissionId),
    #[error("mission {0} has a zero point reward")]
    ZeroPointMission(MissionId),
    #[error("duplicate badge id {0:?}")]
    DuplicateBadgeId(String),
    #[error("badge {0:?} breaks ascending threshold order")]
    UnsortedBadges(String),
    #[error("catalog JSON is malformed: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

#[derive(Deserialize)]
struct MissionFile {
    missions: Vec<Mission>,
}

#[derive(Deserialize)]
struct BadgeFile {
    badges: Vec<Badge>,
}

/// Immutable set of missions available to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionCatalog {
    missions: Vec<Mission>,
}

impl MissionCatalog {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            missions: Vec::new(),
        }
    }

    /// Build a catalog from pre-parsed missions.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or zero-point rewards.
    pub fn from_missions(missions: Vec<Mission>) -> Result<Self, CatalogError> {
        for (idx, mission) in missions.iter().enumerate() {
            if mission.points == 0 {
                return Err(CatalogError::ZeroPointMission(mission.id));
            }
            if missions[..idx].iter().any(|m| m.id == mission.id) {
                return Err(CatalogError::DuplicateMissionId(mission.id));
            }
        }
        Ok(Self { missions })
    }

    /// Load a catalog from a `{"missions": [...]}` JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: MissionFile = serde_json::from_str(json)?;
        Self::from_missions(file.missions)
    }

    /// Find a mission by id.
    #[must_use]
    pub fn find(&self, id: MissionId) -> Option<&Mission> {
        self.missions.iter().find(|mission| mission.id == id)
    }

    /// Whether the catalog contains the given mission id.
    #[must_use]
    pub fn contains(&self, id: MissionId) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.missions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}

/// Immutable badge ladder, ordered ascending by threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeCatalog {
    badges: Vec<Badge>,
}

impl BadgeCatalog {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub const fn empty() -> Self {
        Self { badges: Vec::new() }
    }

    /// Build a catalog from pre-parsed badges.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or thresholds that are not
    /// strictly ascending.
    pub fn from_badges(badges: Vec<Badge>) -> Result<Self, CatalogError> {
        for (idx, badge) in badges.iter().enumerate() {
            if badges[..idx].iter().any(|b| b.id == badge.id) {
                return Err(CatalogError::DuplicateBadgeId(badge.id.clone()));
            }
            if let Some(prev) = idx.checked_sub(1).map(|i| &badges[i])
                && prev.threshold >= badge.threshold
            {
                return Err(CatalogError::UnsortedBadges(badge.id.clone()));
            }
        }
        Ok(Self { badges })
    }

    /// Load a catalog from a `{"badges": [...]}` JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: BadgeFile = serde_json::from_str(json)?;
        Self::from_badges(file.badges)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Badge> {
        self.badges.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.badges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mission(id: MissionId, points: u32) -> Mission {
        Mission {
            id,
            category: MissionCategory::Water,
            title: format!("mission {id}"),
            points,
        }
    }

    fn badge(id: &str, threshold: u32) -> Badge {
        Badge {
            id: id.to_string(),
            name: id.to_uppercase(),
            threshold,
        }
    }

    #[test]
    fn mission_catalog_rejects_duplicates_and_zero_rewards() {
        let err = MissionCatalog::from_missions(vec![mission(1, 10), mission(1, 20)]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateMissionId(1));

        let err = MissionCatalog::from_missions(vec![mission(1, 0)]).unwrap_err();
        assert_eq!(err, CatalogError::ZeroPointMission(1));
    }

    #[test]
    fn badge_catalog_requires_strictly_ascending_thresholds() {
        let err =
            BadgeCatalog::from_badges(vec![badge("a", 100), badge("b", 100)]).unwrap_err();
        assert_eq!(err, CatalogError::UnsortedBadges("b".to_string()));

        let err = BadgeCatalog::from_badges(vec![badge("a", 300), badge("b", 100)]).unwrap_err();
        assert_eq!(err, CatalogError::UnsortedBadges("b".to_string()));

        let catalog = BadgeCatalog::from_badges(vec![badge("a", 100), badge("b", 300)]).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn badge_catalog_rejects_duplicate_ids() {
        let err = BadgeCatalog::from_badges(vec![badge("a", 100), badge("a", 300)]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateBadgeId("a".to_string()));
    }

    #[test]
    fn catalogs_parse_from_json_documents() {
        let missions = MissionCatalog::from_json(
            r#"{"missions":[{"id":1,"category":"water","title":"Shorter shower","points":30}]}"#,
        )
        .unwrap();
        assert!(missions.contains(1));
        assert_eq!(missions.find(1).unwrap().category, MissionCategory::Water);

        let badges = BadgeCatalog::from_json(
            r#"{"badges":[{"id":"b1","name":"Water Keeper","threshold":100}]}"#,
        )
        .unwrap();
        assert_eq!(badges.last().unwrap().threshold, 100);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            MissionCatalog::from_json("not json"),
            Err(CatalogError::Malformed(_))
        ));
    }
}
