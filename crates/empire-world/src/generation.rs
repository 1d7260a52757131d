//! Procedural map generation.
//!
//! Generation runs in four stages:
//! 1. Sample four noise layers and classify each cell into a terrain
//! 2. Carve rivers down a flow field derived from the elevation layer
//! 3. Smooth isolated cells into their surroundings
//! 4. Place special locations, first by terrain preference, then fill-in
//!
//! All randomness comes from the caller's `fastrand::Rng`, so a seeded RNG
//! plus a seeded [`NoiseSource`] reproduce the same map.

use std::collections::HashSet;

use empire_common::{GridCoord, GridSize, LocationId, NEIGHBOR_OFFSETS};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fractal::NoiseSource;
use crate::grid::Grid;
use crate::locations::{weighted_random_location_type, LocationKind, SpecialLocation};
use crate::terrain::TerrainKind;

// ============================================================================
// Classification thresholds
// ============================================================================

/// Below this elevation: deep water.
pub const DEEP_WATER_LEVEL: f64 = 0.25;
/// Below this elevation: coast.
pub const COAST_LEVEL: f64 = 0.30;
/// Below this elevation: lowlands.
pub const LOWLAND_LEVEL: f64 = 0.40;
/// Below this elevation: midlands. At or above: highlands.
pub const HIGHLAND_LEVEL: f64 = 0.70;

/// Lowland moisture above which the ground is wet.
pub const LOWLAND_WET: f64 = 0.7;
/// Lowland moisture below which the ground is dry.
pub const LOWLAND_DRY: f64 = 0.4;
/// Midland moisture below which the ground is dry.
pub const MIDLAND_DRY: f64 = 0.3;
/// Midland moisture above which the ground is wet.
pub const MIDLAND_WET: f64 = 0.6;

/// Temperature below which a cell is cold.
pub const COLD: f64 = 0.3;
/// Temperature above which a dry cell is hot.
pub const HOT_DRY: f64 = 0.6;
/// Temperature above which a humid cell is hot.
pub const HOT_HUMID: f64 = 0.7;

/// Volcanic activity above which highlands become volcanic.
pub const VOLCANIC_LEVEL: f64 = 0.8;

// ============================================================================
// Stage parameters
// ============================================================================

/// Fewer/more river steps than this range is never rolled.
const RIVER_LENGTH: std::ops::Range<usize> = 20..50;
/// Max random tries for a river source or a location slot.
const MAX_ATTEMPTS: usize = 100;
/// Amplitude of the random wobble added to the flow direction.
const RIVER_MEANDER: f64 = 0.6;
/// Distance from the source over which a river gains one cell of width.
const RIVER_WIDENING: f64 = 10.0;

/// Number of smoothing passes.
const SMOOTHING_PASSES: usize = 2;
/// Neighbours (out of 8) that must agree before a cell is converted.
const SMOOTHING_MAJORITY: u8 = 5;

/// Placement chance on a cell matching the type's terrain preference.
const PREFERRED_ACCEPT: f64 = 0.8;
/// Placement chance on any other cell.
const OTHER_ACCEPT: f64 = 0.2;
/// Chance a fill-in pick on water is rejected.
const WATER_REJECT: f64 = 0.8;
/// Minimum number of fill-in locations.
const MIN_FILL_LOCATIONS: usize = 5;

/// One fractal noise layer.
#[derive(Debug, Clone, Copy)]
struct NoiseLayer {
    scale: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    offset: f64,
}

impl NoiseLayer {
    fn sample(&self, noise: &impl NoiseSource, coord: GridCoord) -> f64 {
        let x = f64::from(coord.x) * self.scale + self.offset;
        let y = f64::from(coord.y) * self.scale + self.offset;
        noise.fbm(x, y, self.octaves, self.persistence, self.lacunarity)
    }
}

const ELEVATION: NoiseLayer = NoiseLayer {
    scale: 0.05,
    octaves: 6,
    persistence: 0.5,
    lacunarity: 2.0,
    offset: 0.0,
};
const MOISTURE: NoiseLayer = NoiseLayer {
    scale: 0.04,
    octaves: 4,
    persistence: 0.5,
    lacunarity: 2.0,
    offset: 1000.0,
};
const TEMPERATURE: NoiseLayer = NoiseLayer {
    scale: 0.03,
    octaves: 3,
    persistence: 0.5,
    lacunarity: 2.0,
    offset: 2000.0,
};
const VOLCANIC: NoiseLayer = NoiseLayer {
    scale: 0.1,
    octaves: 2,
    persistence: 0.6,
    lacunarity: 2.2,
    offset: 3000.0,
};

// ============================================================================
// Output
// ============================================================================

/// Counters collected during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Rivers carved.
    pub rivers_carved: usize,
    /// Rivers skipped for lack of a mountain or hill source.
    pub rivers_skipped: usize,
    /// Cells on river main paths.
    pub river_cells: usize,
    /// Cells converted by smoothing.
    pub smoothed_cells: usize,
    /// Locations placed by terrain preference.
    pub preferred_locations: usize,
    /// Locations placed by fill-in.
    pub fill_locations: usize,
    /// Placements abandoned after exhausting their attempts.
    pub placement_failures: usize,
}

/// Main path of a carved river, from source downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiverPath {
    /// Source cell (a mountain or hill before carving).
    pub source: GridCoord,
    /// Cells turned to water along the main channel, in order.
    pub cells: Vec<GridCoord>,
}

/// Everything produced by one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    /// Final terrain.
    pub terrain: Grid<TerrainKind>,
    /// Carved rivers.
    pub rivers: Vec<RiverPath>,
    /// Placed special locations.
    pub locations: Vec<SpecialLocation>,
    /// Generation counters.
    pub report: GenerationReport,
}

/// Runs the full generation pipeline.
pub fn generate(size: GridSize, noise: &impl NoiseSource, rng: &mut fastrand::Rng) -> GeneratedMap {
    let mut report = GenerationReport::default();

    let layers = TerrainLayers::sample(size, noise);
    let mut terrain = layers.classify();

    let flow = FlowField::from_elevation(&layers.elevation, &terrain);
    let rivers = generate_rivers(&mut terrain, &flow, rng, &mut report);

    let terrain = smooth_terrain(terrain, &mut report);
    let locations = generate_special_locations(&terrain, rng, &mut report);

    debug!(
        rivers = report.rivers_carved,
        rivers_skipped = report.rivers_skipped,
        smoothed = report.smoothed_cells,
        locations = locations.len(),
        placement_failures = report.placement_failures,
        "Map generation stages complete"
    );

    GeneratedMap {
        terrain,
        rivers,
        locations,
        report,
    }
}

// ============================================================================
// Stage 1: terrain
// ============================================================================

/// The four noise layers sampled for every cell.
#[derive(Debug, Clone)]
pub struct TerrainLayers {
    /// Height above sea floor, `0..=1`.
    pub elevation: Grid<f64>,
    /// Wetness, `0..=1`.
    pub moisture: Grid<f64>,
    /// Warmth, `0..=1`.
    pub temperature: Grid<f64>,
    /// Volcanic activity, `0..=1`.
    pub volcanic: Grid<f64>,
}

impl TerrainLayers {
    /// Samples all layers at offset coordinate spaces so they are uncorrelated.
    pub fn sample(size: GridSize, noise: &impl NoiseSource) -> Self {
        Self {
            elevation: Grid::from_fn(size, |c| ELEVATION.sample(noise, c)),
            moisture: Grid::from_fn(size, |c| MOISTURE.sample(noise, c)),
            temperature: Grid::from_fn(size, |c| TEMPERATURE.sample(noise, c)),
            volcanic: Grid::from_fn(size, |c| VOLCANIC.sample(noise, c)),
        }
    }

    /// Classifies every cell.
    #[must_use]
    pub fn classify(&self) -> Grid<TerrainKind> {
        let e = self.elevation.cells();
        let m = self.moisture.cells();
        let t = self.temperature.cells();
        let v = self.volcanic.cells();
        let mut index = 0;
        Grid::from_fn(self.elevation.size(), |_| {
            let kind = classify_terrain(e[index], m[index], t[index], v[index]);
            index += 1;
            kind
        })
    }
}

/// Chooses a terrain from the four layer values of a cell.
#[must_use]
pub fn classify_terrain(elevation: f64, moisture: f64, temperature: f64, volcanic: f64) -> TerrainKind {
    let cold = temperature < COLD;

    if elevation < DEEP_WATER_LEVEL {
        TerrainKind::Water
    } else if elevation < COAST_LEVEL {
        TerrainKind::Coastal
    } else if elevation < LOWLAND_LEVEL {
        if moisture > LOWLAND_WET {
            if cold {
                TerrainKind::Snow
            } else {
                TerrainKind::Swamp
            }
        } else if moisture >= LOWLAND_DRY {
            if temperature > HOT_HUMID {
                TerrainKind::Jungle
            } else {
                TerrainKind::Plains
            }
        } else if temperature > HOT_DRY {
            TerrainKind::Savanna
        } else if cold {
            TerrainKind::Snow
        } else {
            TerrainKind::Plains
        }
    } else if elevation < HIGHLAND_LEVEL {
        if moisture < MIDLAND_DRY {
            if temperature > HOT_DRY {
                TerrainKind::Desert
            } else if cold {
                TerrainKind::Snow
            } else {
                TerrainKind::Plains
            }
        } else if moisture <= MIDLAND_WET {
            TerrainKind::Hills
        } else if temperature > HOT_HUMID {
            TerrainKind::Jungle
        } else {
            TerrainKind::Forest
        }
    } else if volcanic > VOLCANIC_LEVEL {
        TerrainKind::Volcanic
    } else if cold {
        TerrainKind::Snow
    } else {
        TerrainKind::Mountains
    }
}

// ============================================================================
// Stage 2: rivers
// ============================================================================

/// Per-cell direction of steepest descent.
#[derive(Debug, Clone)]
pub struct FlowField {
    directions: Grid<Option<(f64, f64)>>,
}

impl FlowField {
    /// Points every non-water cell at its lowest neighbour.
    ///
    /// Cells lower than all neighbours, and water cells, have no flow.
    #[must_use]
    pub fn from_elevation(elevation: &Grid<f64>, terrain: &Grid<TerrainKind>) -> Self {
        let directions = Grid::from_fn(elevation.size(), |coord| {
            match terrain.get(coord) {
                Some(t) if !t.is_water() => {}
                _ => return None,
            }
            let mut lowest = elevation.get(coord).copied()?;
            let mut best = None;
            for &(dx, dy) in &NEIGHBOR_OFFSETS {
                if let Some(&height) = elevation.get(coord.offset(dx, dy)) {
                    if height < lowest {
                        lowest = height;
                        best = Some((f64::from(dx), f64::from(dy)));
                    }
                }
            }
            best
        });
        Self { directions }
    }

    /// Flow direction at a cell.
    #[must_use]
    pub fn direction(&self, coord: GridCoord) -> Option<(f64, f64)> {
        self.directions.get(coord).copied().flatten()
    }
}

/// Carves `floor(sqrt(w*h)/10) + 1` rivers into `terrain`.
pub fn generate_rivers(
    terrain: &mut Grid<TerrainKind>,
    flow: &FlowField,
    rng: &mut fastrand::Rng,
    report: &mut GenerationReport,
) -> Vec<RiverPath> {
    let size = terrain.size();
    let count = (size.area() as f64).sqrt() as usize / 10 + 1;
    let mut rivers = Vec::with_capacity(count);

    for _ in 0..count {
        let Some(source) = find_river_source(terrain, rng) else {
            report.rivers_skipped += 1;
            continue;
        };
        let river = carve_river(terrain, flow, source, rng);
        report.rivers_carved += 1;
        report.river_cells += river.cells.len();
        rivers.push(river);
    }

    if report.rivers_skipped > 0 {
        debug!(skipped = report.rivers_skipped, "No mountain or hill source for some rivers");
    }
    rivers
}

fn find_river_source(terrain: &Grid<TerrainKind>, rng: &mut fastrand::Rng) -> Option<GridCoord> {
    (0..MAX_ATTEMPTS).find_map(|_| {
        let coord = random_cell(terrain.size(), rng);
        matches!(terrain.get(coord), Some(TerrainKind::Mountains | TerrainKind::Hills)).then_some(coord)
    })
}

fn carve_river(
    terrain: &mut Grid<TerrainKind>,
    flow: &FlowField,
    source: GridCoord,
    rng: &mut fastrand::Rng,
) -> RiverPath {
    let size = terrain.size();
    let length = rng.usize(RIVER_LENGTH);
    let mut carved = HashSet::new();
    let mut channel = HashSet::new();
    let mut cells = Vec::new();
    let (mut x, mut y) = (f64::from(source.x), f64::from(source.y));

    for _ in 0..length {
        let cell = GridCoord::new(x as i32, y as i32);
        // Reaching water that this river did not carve ends it.
        if !carved.contains(&cell) && terrain.get(cell).is_some_and(|t| t.is_water()) {
            break;
        }
        terrain.set(cell, TerrainKind::Water);
        carved.insert(cell);
        if channel.insert(cell) {
            cells.push(cell);
        }

        let extra = (cell.distance(source) / RIVER_WIDENING).floor() as usize + 1;
        for _ in 0..extra {
            let bank = cell.offset(rng.i32(-1..=1), rng.i32(-1..=1));
            if terrain.get(bank).is_some_and(|&t| t != TerrainKind::Mountains) {
                terrain.set(bank, TerrainKind::Water);
                carved.insert(bank);
            }
        }

        let Some((fx, fy)) = flow.direction(cell) else {
            break;
        };
        let dx = fx + (rng.f64() - 0.5) * RIVER_MEANDER;
        let dy = fy + (rng.f64() - 0.5) * RIVER_MEANDER;
        let len = dx.hypot(dy);
        if len <= f64::EPSILON {
            break;
        }
        let next = size.clamp(GridCoord::new(
            (x + dx / len).floor() as i32,
            (y + dy / len).floor() as i32,
        ));
        x = f64::from(next.x);
        y = f64::from(next.y);
    }

    RiverPath { source, cells }
}

// ============================================================================
// Stage 3: smoothing
// ============================================================================

/// Converts cells whose neighbours overwhelmingly agree on another terrain.
///
/// Each pass reads the grid as it was at the start of the pass and writes a
/// second buffer; the buffers swap between passes. Border, water and coastal
/// cells are left alone.
#[must_use]
pub fn smooth_terrain(terrain: Grid<TerrainKind>, report: &mut GenerationReport) -> Grid<TerrainKind> {
    let mut front = terrain;
    let mut back = front.clone();

    for _ in 0..SMOOTHING_PASSES {
        report.smoothed_cells += smoothing_pass(&front, &mut back);
        std::mem::swap(&mut front, &mut back);
    }
    front
}

/// One smoothing pass from `front` into `back`. Returns converted cells.
fn smoothing_pass(front: &Grid<TerrainKind>, back: &mut Grid<TerrainKind>) -> usize {
    let size = front.size();
    let mut converted = 0;
    back.copy_from(front);

    for (coord, &kind) in front.iter() {
        if size.is_border(coord) || matches!(kind, TerrainKind::Water | TerrainKind::Coastal) {
            continue;
        }
        let mut counts = [0u8; TerrainKind::COUNT];
        for neighbor in coord.neighbors() {
            if let Some(&n) = front.get(neighbor) {
                counts[n.index()] += 1;
            }
        }
        // A majority of 5 out of 8 is always unique.
        let Some((best, &count)) = counts.iter().enumerate().max_by_key(|&(_, c)| *c) else {
            continue;
        };
        let plurality = TerrainKind::ALL[best];
        if plurality != kind && count >= SMOOTHING_MAJORITY {
            back.set(coord, plurality);
            converted += 1;
        }
    }
    converted
}

// ============================================================================
// Stage 4: special locations
// ============================================================================

/// Places special locations on the finished terrain.
pub fn generate_special_locations(
    terrain: &Grid<TerrainKind>,
    rng: &mut fastrand::Rng,
    report: &mut GenerationReport,
) -> Vec<SpecialLocation> {
    let size = terrain.size();
    let base = size.area() / 100 + 10;
    let catalog_size = LocationKind::COUNT as f64;
    let mut placer = Placer {
        locations: Vec::new(),
        occupied: HashSet::new(),
    };

    // Preference-driven placement.
    for kind in LocationKind::ALL {
        let definition = kind.definition();
        let Some(preference) = definition.terrain_preference else {
            continue;
        };
        let target = ((base as f64 * definition.weight() / catalog_size).floor() as usize).max(1);
        for _ in 0..target {
            let placed = (0..MAX_ATTEMPTS).any(|_| {
                let coord = random_cell(size, rng);
                if placer.occupied.contains(&coord) {
                    return false;
                }
                let matches = terrain.get(coord).is_some_and(|&t| preference.matches(t));
                let chance = if matches { PREFERRED_ACCEPT } else { OTHER_ACCEPT };
                if rng.f64() < chance {
                    placer.place(kind, coord, rng);
                    return true;
                }
                false
            });
            if placed {
                report.preferred_locations += 1;
            } else {
                report.placement_failures += 1;
            }
        }
    }

    // Fill-in placement.
    let remaining = base.saturating_sub(placer.locations.len()).max(MIN_FILL_LOCATIONS);
    for _ in 0..remaining {
        let slot = (0..MAX_ATTEMPTS).find_map(|_| {
            let coord = random_cell(size, rng);
            if placer.occupied.contains(&coord) {
                return None;
            }
            if terrain.get(coord).is_some_and(|t| t.is_water()) && rng.f64() < WATER_REJECT {
                return None;
            }
            Some(coord)
        });
        if let Some(coord) = slot {
            let kind = weighted_random_location_type(rng);
            placer.place(kind, coord, rng);
            report.fill_locations += 1;
        } else {
            report.placement_failures += 1;
        }
    }

    if report.placement_failures > 0 {
        warn!(
            failures = report.placement_failures,
            "Some special locations found no free cell"
        );
    }
    placer.locations
}

struct Placer {
    locations: Vec<SpecialLocation>,
    occupied: HashSet<GridCoord>,
}

impl Placer {
    fn place(&mut self, kind: LocationKind, coord: GridCoord, rng: &mut fastrand::Rng) {
        let id = LocationId::new(self.locations.len() as u32);
        self.locations.push(SpecialLocation::roll(id, kind, coord, rng));
        self.occupied.insert(coord);
    }
}

fn random_cell(size: GridSize, rng: &mut fastrand::Rng) -> GridCoord {
    GridCoord::new(
        rng.i32(0..size.width as i32),
        rng.i32(0..size.height as i32),
    )
}
