//! # Empire World
//!
//! The map core of the Empire game.
//!
//! This crate handles:
//! - Terrain and special-location catalogs
//! - Procedural generation (noise terrain, rivers, smoothing, placement)
//! - Fog of war with decaying memory
//! - Location interactions and rewards
//! - Snapshots for save/load
//!
//! Everything random is drawn from one `fastrand::Rng` seeded from the map
//! seed, so a [`MapConfig`] fully determines the generated map.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod exploration;
pub mod fractal;
pub mod generation;
pub mod grid;
pub mod interaction;
pub mod locations;
pub mod map_system;
pub mod rewards;
pub mod snapshot;
pub mod terrain;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::exploration::{ExplorationLevel, ExplorationSummary, MemoryDecay};
    pub use crate::generation::{GenerationReport, RiverPath};
    pub use crate::interaction::{InteractionError, InteractionOutcome};
    pub use crate::locations::{LocationKind, SpecialLocation};
    pub use crate::map_system::{MapConfig, MapError, MapSystem};
    pub use crate::rewards::{BonusDescriptor, BonusTarget, Reward};
    pub use crate::snapshot::MapSnapshot;
    pub use crate::terrain::{ResourceKind, TerrainKind, TerrainType};
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_explore() {
        let mut map = MapSystem::new(MapConfig::with_seed(64, 48, 7)).expect("valid config");
        assert!(!map.special_locations().is_empty());

        map.explore_area(32, 24, 10.0, Some(1));
        assert!(map.is_fully_explored(32, 24));
        assert!(map.exploration_summary().explored_fraction() > 0.0);
    }

    #[test]
    fn test_snapshot_bytes_roundtrip() {
        let map = MapSystem::new(MapConfig::with_seed(16, 16, 3)).expect("valid config");
        let bytes = map.serialize().to_bytes().expect("serialize failed");
        let restored = MapSystem::deserialize(MapSnapshot::from_bytes(&bytes).expect("deserialize failed"))
            .expect("valid snapshot");
        assert_eq!(restored.config(), map.config());
    }
}
