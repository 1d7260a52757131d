//! Fog of war: exploration levels with decaying memory.
//!
//! Each cell has an [`ExplorationLevel`]. Fully explored cells are permanent.
//! Partially explored cells remember the terrain last seen there and fall
//! back to unexplored once that memory is old enough (see [`MemoryDecay`]).

use empire_common::{GridCoord, GridSize, SnapshotError};
use serde::{Deserialize, Serialize};

use crate::grid::{check_grid, Grid};
use crate::terrain::TerrainKind;

/// How much of a cell the player knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ExplorationLevel {
    /// Never seen, or forgotten.
    #[default]
    Unexplored = 0,
    /// Seen from a distance; memory decays.
    Partial = 1,
    /// Seen up close; permanent.
    Full = 2,
}

impl ExplorationLevel {
    /// True for partial or full exploration.
    #[must_use]
    pub const fn is_explored(self) -> bool {
        !matches!(self, Self::Unexplored)
    }
}

/// Parameters for exploration memory decay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryDecay {
    /// Base chance per update that a stale cell is forgotten.
    pub rate: f64,
    /// Ticks a cell stays remembered before it can decay.
    pub threshold: u64,
}

impl MemoryDecay {
    /// Upper bound on the per-update forget chance.
    pub const MAX_PROBABILITY: f64 = 0.5;

    /// Ticks over which the forget chance grows by one `rate`.
    const RAMP_TICKS: f64 = 1000.0;

    /// Creates decay parameters.
    #[must_use]
    pub const fn new(rate: f64, threshold: u64) -> Self {
        Self { rate, threshold }
    }

    /// Chance that a cell unseen for `elapsed` ticks is forgotten this update.
    #[must_use]
    pub fn probability(&self, elapsed: u64) -> f64 {
        if elapsed <= self.threshold {
            return 0.0;
        }
        let overdue = (elapsed - self.threshold) as f64;
        (self.rate * (1.0 + overdue / Self::RAMP_TICKS)).min(Self::MAX_PROBABILITY)
    }
}

impl Default for MemoryDecay {
    fn default() -> Self {
        Self::new(0.1, 500)
    }
}

/// Cell counts per exploration level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExplorationSummary {
    /// Cells never seen or forgotten.
    pub unexplored: usize,
    /// Cells partially explored.
    pub partial: usize,
    /// Cells fully explored.
    pub full: usize,
}

impl ExplorationSummary {
    /// Fraction of cells at least partially explored.
    #[must_use]
    pub fn explored_fraction(&self) -> f64 {
        let total = self.unexplored + self.partial + self.full;
        if total == 0 {
            return 0.0;
        }
        (self.partial + self.full) as f64 / total as f64
    }
}

/// Exploration grid plus last-seen memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FogOfWar {
    levels: Grid<ExplorationLevel>,
    last_seen_terrain: Grid<Option<TerrainKind>>,
    last_seen_time: Grid<u64>,
}

impl FogOfWar {
    /// Creates a fully unexplored fog for a grid size.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            levels: Grid::filled(size, ExplorationLevel::Unexplored),
            last_seen_terrain: Grid::filled(size, None),
            last_seen_time: Grid::filled(size, 0),
        }
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.levels.size()
    }

    /// Exploration level, `Unexplored` out of bounds.
    #[must_use]
    pub fn level(&self, coord: GridCoord) -> ExplorationLevel {
        self.levels.get(coord).copied().unwrap_or_default()
    }

    /// Terrain last observed at a cell.
    #[must_use]
    pub fn last_seen_terrain(&self, coord: GridCoord) -> Option<TerrainKind> {
        self.last_seen_terrain.get(coord).copied().flatten()
    }

    /// Game time of the last observation, 0 when never seen or out of bounds.
    #[must_use]
    pub fn last_seen_time(&self, coord: GridCoord) -> u64 {
        self.last_seen_time.get(coord).copied().unwrap_or(0)
    }

    /// Reveals cells within `radius` of `center` at game time `now`.
    ///
    /// Cells within half the radius become fully explored; the rest are
    /// raised to partial at most. Memory is refreshed for every touched
    /// cell. Returns the number of cells touched.
    pub fn reveal(&mut self, center: GridCoord, radius: f64, now: u64, terrain: &Grid<TerrainKind>) -> usize {
        let size = self.levels.size();
        if radius.is_nan() || radius < 0.0 || size.area() == 0 {
            return 0;
        }
        let full_radius = radius / 2.0;

        // Scan box in i64, clipped to the grid.
        let reach = radius.ceil().min(f64::from(u32::MAX)) as i64;
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        let (x_min, x_max) = ((cx - reach).max(0), (cx + reach).min(i64::from(size.width) - 1));
        let (y_min, y_max) = ((cy - reach).max(0), (cy + reach).min(i64::from(size.height) - 1));
        let mut touched = 0;

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let distance = ((x - cx) as f64).hypot((y - cy) as f64);
                if distance > radius {
                    continue;
                }
                let coord = GridCoord::new(x as i32, y as i32);
                let Some(index) = size.index_of(coord) else {
                    continue;
                };

                let level = &mut self.levels.cells_mut()[index];
                if distance <= full_radius {
                    *level = ExplorationLevel::Full;
                } else if *level == ExplorationLevel::Unexplored {
                    *level = ExplorationLevel::Partial;
                }

                self.last_seen_terrain.cells_mut()[index] = terrain.get(coord).copied();
                self.last_seen_time.cells_mut()[index] = now;
                touched += 1;
            }
        }
        touched
    }

    /// Lets stale partial memory fade. Returns the number of cells forgotten.
    ///
    /// Forgotten cells drop to unexplored and lose their last-seen terrain;
    /// the last-seen time is left as is. Full cells never decay.
    pub fn decay(&mut self, now: u64, decay: MemoryDecay, rng: &mut fastrand::Rng) -> usize {
        if now == 0 {
            return 0;
        }
        let mut forgotten = 0;

        for index in 0..self.levels.cells().len() {
            if self.levels.cells()[index] != ExplorationLevel::Partial {
                continue;
            }
            let elapsed = now.saturating_sub(self.last_seen_time.cells()[index]);
            let probability = decay.probability(elapsed);
            if probability > 0.0 && rng.f64() < probability {
                self.levels.cells_mut()[index] = ExplorationLevel::Unexplored;
                self.last_seen_terrain.cells_mut()[index] = None;
                forgotten += 1;
            }
        }
        forgotten
    }

    /// Counts cells per exploration level.
    #[must_use]
    pub fn summary(&self) -> ExplorationSummary {
        let mut summary = ExplorationSummary::default();
        for level in self.levels.cells() {
            match level {
                ExplorationLevel::Unexplored => summary.unexplored += 1,
                ExplorationLevel::Partial => summary.partial += 1,
                ExplorationLevel::Full => summary.full += 1,
            }
        }
        summary
    }

    /// Checks that every grid matches `size`.
    pub(crate) fn check_size(&self, size: GridSize) -> Result<(), SnapshotError> {
        check_grid("exploration", &self.levels, size)?;
        check_grid("last_seen_terrain", &self.last_seen_terrain, size)?;
        check_grid("last_seen_time", &self.last_seen_time, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plains(size: GridSize) -> Grid<TerrainKind> {
        Grid::filled(size, TerrainKind::Plains)
    }

    #[test]
    fn test_reveal_levels() {
        let size = GridSize::new(20, 20);
        let terrain = plains(size);
        let mut fog = FogOfWar::new(size);

        fog.reveal(GridCoord::new(10, 10), 4.0, 7, &terrain);

        assert_eq!(fog.level(GridCoord::new(10, 10)), ExplorationLevel::Full);
        assert_eq!(fog.level(GridCoord::new(12, 10)), ExplorationLevel::Full);
        assert_eq!(fog.level(GridCoord::new(13, 10)), ExplorationLevel::Partial);
        assert_eq!(fog.level(GridCoord::new(14, 10)), ExplorationLevel::Partial);
        assert_eq!(fog.level(GridCoord::new(15, 10)), ExplorationLevel::Unexplored);
        assert_eq!(fog.last_seen_time(GridCoord::new(13, 10)), 7);
        assert_eq!(fog.last_seen_terrain(GridCoord::new(13, 10)), Some(TerrainKind::Plains));
        assert_eq!(fog.last_seen_terrain(GridCoord::new(15, 10)), None);
    }

    #[test]
    fn test_reveal_refreshes_memory_of_full_cells() {
        let size = GridSize::new(10, 10);
        let terrain = plains(size);
        let mut fog = FogOfWar::new(size);
        fog.reveal(GridCoord::new(5, 5), 2.0, 10, &terrain);
        fog.reveal(GridCoord::new(5, 5), 2.0, 90, &terrain);
        assert_eq!(fog.level(GridCoord::new(5, 5)), ExplorationLevel::Full);
        assert_eq!(fog.last_seen_time(GridCoord::new(5, 5)), 90);
    }

    #[test]
    fn test_reveal_clipped_at_edges() {
        let size = GridSize::new(5, 5);
        let terrain = plains(size);
        let mut fog = FogOfWar::new(size);
        let touched = fog.reveal(GridCoord::new(0, 0), 1.0, 1, &terrain);
        // (0,0), (1,0), (0,1)
        assert_eq!(touched, 3);
    }

    #[test]
    fn test_reveal_unbounded_radius() {
        let size = GridSize::new(10, 10);
        let terrain = plains(size);
        let mut fog = FogOfWar::new(size);
        assert_eq!(fog.reveal(GridCoord::new(5, 5), f64::INFINITY, 1, &terrain), 100);
        assert_eq!(fog.summary().full, 100);

        let mut fog = FogOfWar::new(size);
        assert_eq!(fog.reveal(GridCoord::new(5, 5), 5000.0, 1, &terrain), 100);
        assert_eq!(fog.summary().full, 100);
    }

    #[test]
    fn test_reveal_far_off_grid_center() {
        let size = GridSize::new(10, 10);
        let terrain = plains(size);
        let mut fog = FogOfWar::new(size);
        assert_eq!(fog.reveal(GridCoord::new(i32::MAX, i32::MAX), 8.0, 1, &terrain), 0);
        assert_eq!(fog.reveal(GridCoord::new(i32::MIN, 3), 1.0e9, 1, &terrain), 0);
        assert_eq!(fog.summary().unexplored, 100);
        // Near the edge, only the in-grid part of the disc is touched.
        assert_eq!(fog.reveal(GridCoord::new(-1, 0), 1.0, 1, &terrain), 1);
        // A radius wide enough to cross the gap still reaches the grid.
        assert_eq!(fog.reveal(GridCoord::new(i32::MIN, 3), f64::MAX, 2, &terrain), 100);
    }

    #[test]
    fn test_decay_probability() {
        let decay = MemoryDecay::default();
        assert!(decay.probability(500).abs() < f64::EPSILON);
        assert!((decay.probability(1500) - 0.2).abs() < 1e-9);
        assert!((decay.probability(1_000_000) - MemoryDecay::MAX_PROBABILITY).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decay_clears_terrain_but_keeps_time() {
        let size = GridSize::new(9, 9);
        let terrain = plains(size);
        let mut fog = FogOfWar::new(size);
        let mut rng = fastrand::Rng::with_seed(4);
        fog.reveal(GridCoord::new(4, 4), 4.0, 10, &terrain);
        let edge = GridCoord::new(8, 4);
        assert_eq!(fog.level(edge), ExplorationLevel::Partial);

        for _ in 0..200 {
            fog.decay(100_000, MemoryDecay::new(1.0, 0), &mut rng);
        }

        assert_eq!(fog.level(edge), ExplorationLevel::Unexplored);
        assert_eq!(fog.last_seen_terrain(edge), None);
        assert_eq!(fog.last_seen_time(edge), 10);
        assert_eq!(fog.level(GridCoord::new(4, 4)), ExplorationLevel::Full);
    }

    #[test]
    fn test_decay_noop_at_time_zero() {
        let size = GridSize::new(9, 9);
        let terrain = plains(size);
        let mut fog = FogOfWar::new(size);
        let mut rng = fastrand::Rng::with_seed(4);
        fog.reveal(GridCoord::new(4, 4), 4.0, 0, &terrain);
        let before = fog.clone();
        assert_eq!(fog.decay(0, MemoryDecay::new(1.0, 0), &mut rng), 0);
        assert_eq!(fog, before);
    }

    #[test]
    fn test_summary() {
        let size = GridSize::new(10, 10);
        let terrain = plains(size);
        let mut fog = FogOfWar::new(size);
        fog.reveal(GridCoord::new(5, 5), 0.0, 1, &terrain);
        let summary = fog.summary();
        assert_eq!(summary.full, 1);
        assert_eq!(summary.partial, 0);
        assert_eq!(summary.unexplored, 99);
        assert!((summary.explored_fraction() - 0.01).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn reveal_never_lowers_levels(
            reveals in prop::collection::vec((0i32..16, 0i32..16, 0.0f64..6.0), 1..12)
        ) {
            let size = GridSize::new(16, 16);
            let terrain = plains(size);
            let mut fog = FogOfWar::new(size);
            for (i, (x, y, r)) in reveals.into_iter().enumerate() {
                let before = fog.clone();
                fog.reveal(GridCoord::new(x, y), r, i as u64 + 1, &terrain);
                for coord in size.coords() {
                    prop_assert!(fog.level(coord) >= before.level(coord));
                }
            }
        }

        #[test]
        fn decay_never_touches_full_cells(
            x in 0i32..16, y in 0i32..16, r in 0.0f64..8.0,
            now in 1u64..1_000_000, rate in 0.0f64..5.0, threshold in 0u64..2000,
        ) {
            let size = GridSize::new(16, 16);
            let terrain = plains(size);
            let mut fog = FogOfWar::new(size);
            let mut rng = fastrand::Rng::with_seed(now);
            fog.reveal(GridCoord::new(x, y), r, 1, &terrain);
            let full_before: Vec<_> = size.coords().filter(|c| fog.level(*c) == ExplorationLevel::Full).collect();
            for _ in 0..5 {
                fog.decay(now, MemoryDecay::new(rate, threshold), &mut rng);
            }
            for coord in full_before {
                prop_assert_eq!(fog.level(coord), ExplorationLevel::Full);
            }
        }

        #[test]
        fn out_of_bounds_queries_are_neutral(x in -50i32..50, y in -50i32..50) {
            let size = GridSize::new(10, 10);
            let fog = FogOfWar::new(size);
            if !size.contains(GridCoord::new(x, y)) {
                prop_assert_eq!(fog.level(GridCoord::new(x, y)), ExplorationLevel::Unexplored);
                prop_assert_eq!(fog.last_seen_terrain(GridCoord::new(x, y)), None);
                prop_assert_eq!(fog.last_seen_time(GridCoord::new(x, y)), 0);
            }
        }
    }
}
