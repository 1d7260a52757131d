//! Coordinate types for map grids.
//!
//! Grid coordinates are signed so callers scanning a viewport can ask about
//! cells past the map edge; [`GridSize`] decides what is in bounds.

use serde::{Deserialize, Serialize};

/// Cell coordinate on a map grid (may lie outside the grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by `(dx, dy)`, saturating at the `i32` range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Manhattan (taxicab) distance to another coordinate.
    ///
    /// Widened to `u64`: two far-apart `i32` coordinates can be more than
    /// `u32::MAX` apart.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u64 {
        self.x.abs_diff(other.x) as u64 + self.y.abs_diff(other.y) as u64
    }

    /// Euclidean distance to another coordinate.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Iterates over the 8 neighbouring coordinates (Moore neighbourhood).
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| self.offset(dx, dy))
    }
}

/// Offsets of the 8 neighbours of a cell, row by row.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Dimensions of a rectangular grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
}

impl GridSize {
    /// Creates a new grid size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[must_use]
    pub const fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Checks whether a coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.width && (coord.y as u32) < self.height
    }

    /// Checks whether a coordinate lies on the outermost ring of cells.
    #[must_use]
    pub const fn is_border(self, coord: GridCoord) -> bool {
        coord.x == 0
            || coord.y == 0
            || coord.x as u32 == self.width - 1
            || coord.y as u32 == self.height - 1
    }

    /// Converts a coordinate to a row-major index, or `None` when out of bounds.
    #[must_use]
    pub const fn index_of(self, coord: GridCoord) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.y as usize) * (self.width as usize) + (coord.x as usize))
        } else {
            None
        }
    }

    /// Converts a row-major index back to a coordinate.
    #[must_use]
    pub const fn coord_of(self, index: usize) -> GridCoord {
        let width = self.width as usize;
        GridCoord {
            x: (index % width) as i32,
            y: (index / width) as i32,
        }
    }

    /// Clamps a coordinate into the grid.
    #[must_use]
    pub fn clamp(self, coord: GridCoord) -> GridCoord {
        GridCoord {
            x: coord.x.clamp(0, self.width.saturating_sub(1) as i32),
            y: coord.y.clamp(0, self.height.saturating_sub(1) as i32),
        }
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(self) -> impl Iterator<Item = GridCoord> {
        (0..self.height as i32).flat_map(move |y| (0..self.width as i32).map(move |x| GridCoord::new(x, y)))
    }
}
