//! Centralized tuning constants for EarthGuardian progress logic.

// Leveling -----------------------------------------------------------------
/// Points required to advance one level.
pub const POINTS_PER_LEVEL: u32 = 200;
/// Points equivalent to one "tree saved" on the profile screen.
pub const POINTS_PER_TREE: u32 = 20;

// Persistence --------------------------------------------------------------
/// Storage key under which the serialized progress snapshot lives.
pub const STORAGE_KEY: &str = "earthguard.progress";
