//! Embedded catalog assets.
//!
//! The CLI ships its catalogs inside the binary; the library only sees the
//! parsed, validated form.

use earthguard_progress::{BadgeCatalog, CatalogError, CatalogSource, MissionCatalog};

/// Catalog source backed by the JSON documents under `data/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogs;

impl CatalogSource for StaticCatalogs {
    type Error = CatalogError;

    fn load_missions(&self) -> Result<MissionCatalog, Self::Error> {
        MissionCatalog::from_json(include_str!("../data/missions.json"))
    }

    fn load_badges(&self) -> Result<BadgeCatalog, Self::Error> {
        BadgeCatalog::from_json(include_str!("../data/badges.json"))
    }
}
