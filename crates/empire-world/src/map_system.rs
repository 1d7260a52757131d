//! The map core: terrain, special locations and fog of war behind one API.
//!
//! Queries take signed cell coordinates and never fail; anything outside
//! the grid answers with the neutral value documented on each method.

use std::collections::HashMap;

use empire_common::{ConfigError, GridCoord, GridSize, LocationId, SnapshotError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::exploration::{ExplorationLevel, ExplorationSummary, FogOfWar, MemoryDecay};
use crate::fractal::PerlinNoise;
use crate::generation::{generate, GenerationReport, RiverPath};
use crate::grid::Grid;
use crate::interaction::{interact, InteractionError, InteractionResult, InteractionOutcome};
use crate::locations::{weighted_random_location_type, LocationKind, SpecialLocation};
use crate::rewards::{generate_rewards, Reward};
use crate::terrain::{CombatModifiers, ResourceKind, TerrainKind, TerrainType};

/// Errors from building or restoring a map.
#[derive(Debug, Error)]
pub enum MapError {
    /// Invalid map configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot could not be restored
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Result type for map operations.
pub type MapResult<T> = Result<T, MapError>;

/// Map dimensions and seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    /// Seed for noise and every random decision
    pub seed: u64,
}

impl MapConfig {
    /// Creates a config with a random seed.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_seed(width, height, fastrand::u64(..))
    }

    /// Creates a config with a fixed seed.
    #[must_use]
    pub const fn with_seed(width: u32, height: u32, seed: u64) -> Self {
        Self { width, height, seed }
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Rejects zero dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Generated map plus exploration state.
#[derive(Debug, Clone)]
pub struct MapSystem {
    pub(crate) config: MapConfig,
    pub(crate) terrain: Grid<TerrainKind>,
    pub(crate) fog: FogOfWar,
    pub(crate) locations: Vec<SpecialLocation>,
    pub(crate) rivers: Vec<RiverPath>,
    pub(crate) report: GenerationReport,
    pub(crate) game_time: u64,
    pub(crate) rng: fastrand::Rng,
    /// Cell -> index into `locations`.
    pub(crate) location_cells: HashMap<GridCoord, usize>,
}

impl MapSystem {
    /// Validates `config` and generates a map from its seed.
    pub fn new(config: MapConfig) -> MapResult<Self> {
        config.validate()?;
        let size = config.size();
        let mut map = Self {
            config,
            terrain: Grid::filled(size, TerrainKind::Plains),
            fog: FogOfWar::new(size),
            locations: Vec::new(),
            rivers: Vec::new(),
            report: GenerationReport::default(),
            game_time: 0,
            rng: fastrand::Rng::with_seed(config.seed),
            location_cells: HashMap::new(),
        };
        map.generate_map(config)?;
        Ok(map)
    }

    /// Creates a map of uniform terrain with no rivers or locations.
    pub fn flat(config: MapConfig, terrain: TerrainKind) -> MapResult<Self> {
        config.validate()?;
        let size = config.size();
        Ok(Self {
            config,
            terrain: Grid::filled(size, terrain),
            fog: FogOfWar::new(size),
            locations: Vec::new(),
            rivers: Vec::new(),
            report: GenerationReport::default(),
            game_time: 0,
            rng: fastrand::Rng::with_seed(config.seed),
            location_cells: HashMap::new(),
        })
    }

    /// Regenerates this map in place, resetting exploration and game time.
    pub fn generate_map(&mut self, config: MapConfig) -> MapResult<()> {
        config.validate()?;
        let size = config.size();
        let mut rng = fastrand::Rng::with_seed(config.seed);
        let noise = PerlinNoise::new(PerlinNoise::seed_from_map_seed(config.seed));

        let generated = generate(size, &noise, &mut rng);

        self.config = config;
        self.terrain = generated.terrain;
        self.fog = FogOfWar::new(size);
        self.locations = generated.locations;
        self.rivers = generated.rivers;
        self.report = generated.report;
        self.game_time = 0;
        self.rng = rng;
        self.index_locations();

        info!(
            width = config.width,
            height = config.height,
            seed = config.seed,
            rivers = self.rivers.len(),
            locations = self.locations.len(),
            "Generated map"
        );
        Ok(())
    }

    /// Rebuilds the cell index. The first location listed at a cell wins.
    pub(crate) fn index_locations(&mut self) {
        self.location_cells.clear();
        for (i, loc) in self.locations.iter().enumerate() {
            self.location_cells.entry(loc.position).or_insert(i);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Map configuration.
    #[must_use]
    pub const fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.config.size()
    }

    /// Current game time, as last passed to [`Self::explore_area`].
    #[must_use]
    pub const fn game_time(&self) -> u64 {
        self.game_time
    }

    /// Counters from the last generation.
    #[must_use]
    pub const fn generation_report(&self) -> &GenerationReport {
        &self.report
    }

    /// Carved rivers.
    #[must_use]
    pub fn rivers(&self) -> &[RiverPath] {
        &self.rivers
    }

    /// All special locations.
    #[must_use]
    pub fn special_locations(&self) -> &[SpecialLocation] {
        &self.locations
    }

    /// Special locations that have been discovered.
    pub fn discovered_locations(&self) -> impl Iterator<Item = &SpecialLocation> {
        self.locations.iter().filter(|loc| loc.discovered)
    }

    /// Location by id.
    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&SpecialLocation> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    /// Cell counts per exploration level.
    #[must_use]
    pub fn exploration_summary(&self) -> ExplorationSummary {
        self.fog.summary()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Terrain kind at a cell.
    #[must_use]
    pub fn terrain_kind_at(&self, x: i32, y: i32) -> Option<TerrainKind> {
        self.terrain.get(GridCoord::new(x, y)).copied()
    }

    /// Terrain definition at a cell.
    #[must_use]
    pub fn terrain_at(&self, x: i32, y: i32) -> Option<&'static TerrainType> {
        self.terrain_kind_at(x, y).map(TerrainKind::definition)
    }

    /// Special location occupying a cell.
    #[must_use]
    pub fn special_location_at(&self, x: i32, y: i32) -> Option<&SpecialLocation> {
        self.location_cells
            .get(&GridCoord::new(x, y))
            .and_then(|&i| self.locations.get(i))
    }

    /// Exploration level, `Unexplored` out of bounds.
    #[must_use]
    pub fn exploration_level(&self, x: i32, y: i32) -> ExplorationLevel {
        self.fog.level(GridCoord::new(x, y))
    }

    /// Whether a cell is at least partially explored.
    #[must_use]
    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.exploration_level(x, y).is_explored()
    }

    /// Whether a cell is fully explored.
    #[must_use]
    pub fn is_fully_explored(&self, x: i32, y: i32) -> bool {
        self.exploration_level(x, y) == ExplorationLevel::Full
    }

    /// Terrain remembered at a cell.
    #[must_use]
    pub fn last_seen_terrain(&self, x: i32, y: i32) -> Option<TerrainKind> {
        self.fog.last_seen_terrain(GridCoord::new(x, y))
    }

    /// Game time the cell was last seen, 0 when never.
    #[must_use]
    pub fn last_seen_time(&self, x: i32, y: i32) -> u64 {
        self.fog.last_seen_time(GridCoord::new(x, y))
    }

    /// Straight-line travel cost between two cells.
    ///
    /// Manhattan distance times the mean movement cost of `distance + 1`
    /// evenly spaced samples on the segment. Samples off the grid cost 1.0
    /// and are counted without being visited.
    #[must_use]
    pub fn movement_cost(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> f64 {
        let distance = GridCoord::new(x0, y0).manhattan_distance(GridCoord::new(x1, y1));
        if distance == 0 {
            return 0.0;
        }

        let size = self.size();
        let steps = distance as f64;
        let (start_x, start_y) = (f64::from(x0), f64::from(y0));
        let (dx, dy) = (f64::from(x1) - start_x, f64::from(y1) - start_y);

        let mut total = 0.0;
        let mut visited = 0u64;
        if let Some((first, last)) = sample_window(start_x, dx, size.width, steps)
            .zip(sample_window(start_y, dy, size.height, steps))
            .map(|((x_lo, x_hi), (y_lo, y_hi))| (x_lo.max(y_lo), x_hi.min(y_hi)))
            .filter(|(first, last)| first <= last)
        {
            for i in first..=last {
                let t = i as f64 / steps;
                let sample = GridCoord::new(
                    (start_x + dx * t).floor() as i32,
                    (start_y + dy * t).floor() as i32,
                );
                total += self
                    .terrain
                    .get(sample)
                    .map_or(1.0, |kind| kind.definition().movement_cost);
            }
            visited = last - first + 1;
        }
        total += (distance + 1 - visited) as f64;

        steps * total / (steps + 1.0)
    }

    /// Resource multiplier at a cell, 1.0 when absent or out of bounds.
    #[must_use]
    pub fn resource_modifier(&self, x: i32, y: i32, resource: ResourceKind) -> f64 {
        self.terrain_at(x, y)
            .map_or(1.0, |terrain| terrain.resource_modifier(resource))
    }

    /// Terrain combat modifiers, neutral out of bounds.
    #[must_use]
    pub fn combat_modifiers(&self, x: i32, y: i32) -> CombatModifiers {
        self.terrain_at(x, y)
            .map_or(CombatModifiers::NEUTRAL, |terrain| terrain.combat)
    }

    // ========================================================================
    // Exploration
    // ========================================================================

    /// Reveals the area around `(x, y)`. Returns the number of cells seen.
    ///
    /// `game_time`, when given, becomes the current game time before the
    /// reveal. Locations inside the radius are discovered; inside
    /// `radius / 1.5` they are fully discovered.
    pub fn explore_area(&mut self, x: i32, y: i32, radius: f64, game_time: Option<u64>) -> usize {
        if let Some(time) = game_time {
            self.game_time = time;
        }
        let center = GridCoord::new(x, y);
        let seen = self.fog.reveal(center, radius, self.game_time, &self.terrain);

        let full_radius = radius / 1.5;
        for loc in &mut self.locations {
            let distance = loc.position.distance(center);
            if distance <= radius && !loc.discovered {
                loc.discovered = true;
                debug!(location = %loc.id, kind = ?loc.kind, "Discovered location");
            }
            if distance <= full_radius {
                loc.fully_discovered = true;
            }
        }
        seen
    }

    /// Lets partial memory of long-unseen cells fade.
    ///
    /// Does not advance the internal game time. Returns cells forgotten.
    pub fn update_exploration_memory(&mut self, game_time: u64, decay: MemoryDecay) -> usize {
        let forgotten = self.fog.decay(game_time, decay, &mut self.rng);
        if forgotten > 0 {
            debug!(forgotten, game_time, "Exploration memory faded");
        }
        forgotten
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Interacts with a location, at most once.
    pub fn interact_with_location(&mut self, id: LocationId) -> InteractionResult<InteractionOutcome> {
        let location = self
            .locations
            .iter_mut()
            .find(|loc| loc.id == id)
            .ok_or(InteractionError::NotFound(id))?;
        interact(location, &mut self.rng)
    }

    /// Rolls rewards for a location type from the map's random stream.
    pub fn generate_rewards(&mut self, kind: LocationKind) -> Vec<Reward> {
        generate_rewards(kind, &mut self.rng)
    }

    /// Draws a location type weighted by rarity from the map's random stream.
    pub fn weighted_random_location_type(&mut self) -> LocationKind {
        weighted_random_location_type(&mut self.rng)
    }
}

/// Sample indices on one axis whose coordinate `start + delta * i / steps`
/// can land in `0..len`, widened by one each side for rounding.
fn sample_window(start: f64, delta: f64, len: u32, steps: f64) -> Option<(u64, u64)> {
    let len = f64::from(len);
    if delta == 0.0 {
        return (start >= 0.0 && start < len).then_some((0, steps as u64));
    }
    let enter = -start / delta * steps;
    let leave = (len - start) / delta * steps;
    let (lo, hi) = if enter < leave { (enter, leave) } else { (leave, enter) };
    let lo = (lo.floor() - 1.0).max(0.0);
    let hi = (hi.ceil() + 1.0).min(steps);
    (lo <= hi).then_some((lo as u64, hi as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(width: u32, height: u32, seed: u64) -> MapSystem {
        MapSystem::new(MapConfig::with_seed(width, height, seed)).expect("valid config")
    }

    #[test]
    fn test_grid_complete() {
        let map = map(37, 23, 8);
        for y in 0..23 {
            for x in 0..37 {
                assert!(map.terrain_at(x, y).is_some(), "missing terrain at ({x}, {y})");
                assert_eq!(map.exploration_level(x, y), ExplorationLevel::Unexplored);
            }
        }
        assert_eq!(map.game_time(), 0);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = MapSystem::new(MapConfig::with_seed(0, 10, 1));
        assert!(matches!(
            result,
            Err(MapError::Config(ConfigError::InvalidDimensions { width: 0, height: 10 }))
        ));
        assert!(MapConfig::with_seed(10, 0, 1).validate().is_err());
    }

    #[test]
    fn test_same_seed_same_map() {
        let a = map(48, 32, 1234);
        let b = map(48, 32, 1234);
        assert_eq!(a.terrain, b.terrain);
        assert_eq!(a.special_locations(), b.special_locations());
        assert_eq!(a.rivers(), b.rivers());
    }

    #[test]
    fn test_regenerate_resets_state() {
        let mut map = map(20, 20, 3);
        map.explore_area(10, 10, 4.0, Some(50));
        map.generate_map(MapConfig::with_seed(12, 8, 4)).expect("valid config");

        assert_eq!(map.size(), GridSize::new(12, 8));
        assert_eq!(map.game_time(), 0);
        assert_eq!(map.exploration_summary().unexplored, 96);
    }

    #[test]
    fn test_bounds_safety() {
        let mut map = map(10, 10, 42);
        for (x, y) in [(-1, 0), (10, 0), (0, -1), (0, 10)] {
            assert!(map.terrain_at(x, y).is_none());
            assert!(map.special_location_at(x, y).is_none());
            assert_eq!(map.exploration_level(x, y), ExplorationLevel::Unexplored);
            assert!(!map.is_explored(x, y));
            assert!(map.last_seen_terrain(x, y).is_none());
            assert_eq!(map.last_seen_time(x, y), 0);
            assert!((map.resource_modifier(x, y, ResourceKind::Gold) - 1.0).abs() < f64::EPSILON);
            assert_eq!(map.combat_modifiers(x, y), CombatModifiers::NEUTRAL);
        }
        // Only (0, 0) is in bounds and within reach of (-1, -1).
        let seen = map.explore_area(-1, -1, 2.0, None);
        assert_eq!(seen, 1);
        assert!(map.is_explored(0, 0));
    }

    #[test]
    fn test_special_location_lookup() {
        let map = map(40, 40, 11);
        for loc in map.special_locations() {
            let found = map
                .special_location_at(loc.position.x, loc.position.y)
                .expect("location indexed");
            assert_eq!(found.id, loc.id);
            assert_eq!(map.location(loc.id).map(|l| l.position), Some(loc.position));
        }
    }

    #[test]
    fn test_rivers_are_water() {
        let map = map(80, 60, 2024);
        for river in map.rivers() {
            for cell in &river.cells {
                assert_eq!(map.terrain_kind_at(cell.x, cell.y), Some(TerrainKind::Water));
            }
        }
    }

    #[test]
    fn test_uniform_movement_cost() {
        let map = MapSystem::flat(MapConfig::with_seed(10, 10, 0), TerrainKind::Forest).expect("valid config");
        assert!((map.movement_cost(0, 0, 3, 4) - 10.5).abs() < 1e-9);
        assert!((map.movement_cost(9, 9, 0, 0) - 27.0).abs() < 1e-9);
        assert!(map.movement_cost(4, 4, 4, 4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_movement_cost_off_grid_samples() {
        let map = MapSystem::flat(MapConfig::with_seed(10, 10, 0), TerrainKind::Forest).expect("valid config");
        // Samples at x = -2, -1, 0: costs 1.0, 1.0, 1.5.
        let cost = map.movement_cost(-2, 0, 0, 0);
        assert!((cost - 2.0 * 3.5 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_movement_cost_extreme_coordinates() {
        let map = MapSystem::flat(MapConfig::with_seed(10, 10, 0), TerrainKind::Plains).expect("valid config");
        let distance = 2.0 * f64::from(u32::MAX);
        let cost = map.movement_cost(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert!((cost - distance).abs() < 1e-3);
        // Entirely off the grid: every sample costs 1.0.
        let cost = map.movement_cost(i32::MIN, -5, i32::MAX, -5);
        assert!((cost - f64::from(u32::MAX)).abs() < 1e-3);
    }

    #[test]
    fn test_explore_area_extreme_input() {
        let mut map = MapSystem::flat(MapConfig::with_seed(10, 10, 0), TerrainKind::Plains).expect("valid config");
        assert_eq!(map.explore_area(i32::MAX, i32::MIN, 8.0, Some(1)), 0);
        assert_eq!(map.explore_area(5, 5, f64::INFINITY, Some(2)), 100);
        assert!(map.is_fully_explored(0, 9));
        assert_eq!(map.last_seen_time(9, 0), 2);
    }

    #[test]
    fn test_movement_cost_long_segment_through_grid() {
        let map = MapSystem::flat(MapConfig::with_seed(10, 10, 0), TerrainKind::Forest).expect("valid config");
        // One sample per column from -2^20 to 2^20 on row 3; ten of them are forest.
        let cost = map.movement_cost(-1 << 20, 3, 1 << 20, 3);
        let steps = f64::from(1u32 << 21);
        let samples = steps + 1.0;
        let expected = steps * (samples - 10.0 + 10.0 * 1.5) / samples;
        assert!((cost - expected).abs() < 1e-6);
    }

    #[test]
    fn test_exploration_monotonic_without_decay() {
        let mut map = MapSystem::flat(MapConfig::with_seed(20, 20, 0), TerrainKind::Plains).expect("valid config");
        map.explore_area(5, 5, 6.0, Some(1));
        let before = map.exploration_summary();
        map.explore_area(15, 15, 3.0, Some(2));
        map.explore_area(5, 5, 1.0, Some(3));

        for y in 0..20 {
            for x in 0..20 {
                let c = GridCoord::new(x, y);
                if c.distance(GridCoord::new(5, 5)) <= 3.0 {
                    assert!(map.is_fully_explored(x, y));
                }
            }
        }
        let after = map.exploration_summary();
        assert!(after.full >= before.full);
        assert!(after.unexplored <= before.unexplored);
    }

    #[test]
    fn test_explore_updates_memory_and_time() {
        let mut map = MapSystem::flat(MapConfig::with_seed(10, 10, 0), TerrainKind::Savanna).expect("valid config");
        map.explore_area(2, 2, 1.0, Some(77));

        assert_eq!(map.game_time(), 77);
        assert_eq!(map.last_seen_terrain(2, 3), Some(TerrainKind::Savanna));
        assert_eq!(map.last_seen_time(2, 3), 77);

        // No time given: the current game time is reused.
        map.explore_area(8, 8, 0.0, None);
        assert_eq!(map.last_seen_time(8, 8), 77);
        assert!(map.is_fully_explored(8, 8));
    }

    #[test]
    fn test_decay_keeps_full_cells() {
        let mut map = MapSystem::flat(MapConfig::with_seed(10, 10, 5), TerrainKind::Plains).expect("valid config");
        map.explore_area(5, 5, 3.0, Some(100));
        let full = map.exploration_summary().full;

        for step in 0..100 {
            map.update_exploration_memory(10_000 + step, MemoryDecay::new(1.0, 0));
        }

        assert_eq!(map.exploration_summary().full, full);
        assert_eq!(map.exploration_summary().partial, 0);
        assert_eq!(map.game_time(), 100);
    }

    #[test]
    fn test_interaction_at_most_once() {
        let mut map = map(40, 40, 9);
        let id = map.special_locations()[0].id;

        map.interact_with_location(id).expect("first interaction");
        assert!(map.location(id).is_some_and(|l| l.interacted));
        assert_eq!(
            map.interact_with_location(id),
            Err(InteractionError::AlreadyInteracted(id))
        );

        let missing = LocationId::new(u32::MAX);
        assert_eq!(
            map.interact_with_location(missing),
            Err(InteractionError::NotFound(missing))
        );
    }

    #[test]
    fn test_end_to_end_scouting() {
        let mut map = map(10, 10, 42);
        map.explore_area(5, 5, 3.0, Some(100));

        let summary = map.exploration_summary();
        assert_eq!(summary.full, 9);
        assert_eq!(summary.partial, 20);
        assert!(map.is_fully_explored(6, 6));
        assert!(!map.is_fully_explored(7, 5));
        assert!(map.is_explored(8, 5));
        assert!(!map.is_explored(9, 5));
        assert_eq!(map.last_seen_time(5, 8), 100);

        for loc in map.special_locations() {
            let distance = loc.position.distance(GridCoord::new(5, 5));
            assert_eq!(loc.discovered, distance <= 3.0, "{}", loc.id);
            assert_eq!(loc.fully_discovered, distance <= 2.0, "{}", loc.id);
        }

        // Heavy decay: 50% per call for every partial cell.
        let heavy = MemoryDecay::new(1.0, 0);
        let mut forgotten = 0;
        for step in 0..64 {
            forgotten += map.update_exploration_memory(5_000 + step, heavy);
        }

        assert_eq!(forgotten, 20);
        let summary = map.exploration_summary();
        assert_eq!(summary.full, 9);
        assert_eq!(summary.partial, 0);
        assert_eq!(map.last_seen_terrain(8, 5), None);
        assert_eq!(map.last_seen_time(8, 5), 100);
        assert!(map.last_seen_terrain(5, 5).is_some());
    }

    #[test]
    fn test_weighted_type_from_map_stream() {
        let mut a = map(10, 10, 7);
        let mut b = map(10, 10, 7);
        let picks_a: Vec<_> = (0..20).map(|_| a.weighted_random_location_type()).collect();
        let picks_b: Vec<_> = (0..20).map(|_| b.weighted_random_location_type()).collect();
        assert_eq!(picks_a, picks_b);
        assert!(!a.generate_rewards(LocationKind::DragonLair).is_empty());
    }
}
