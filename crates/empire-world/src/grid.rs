//! Dense row-major grids.

use empire_common::{GridCoord, GridSize, SnapshotError};
use serde::{Deserialize, Serialize};

/// A `height x width` grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    /// Grid dimensions
    size: GridSize,
    /// Cell data (width x height cells)
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(size: GridSize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size.area()],
        }
    }
}

impl<T> Grid<T> {
    /// Builds a grid by evaluating `f` for every coordinate in row-major order.
    pub fn from_fn(size: GridSize, mut f: impl FnMut(GridCoord) -> T) -> Self {
        let cells = size.coords().map(&mut f).collect();
        Self { size, cells }
    }

    /// Returns the grid dimensions.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Returns true when the cell buffer matches the declared dimensions.
    ///
    /// Always true for grids built in this crate; deserialized grids are
    /// checked with this before use.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.cells.len() == self.size.area()
    }

    /// Gets the cell at a coordinate, `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: GridCoord) -> Option<&T> {
        self.size.index_of(coord).and_then(|i| self.cells.get(i))
    }

    /// Gets a mutable cell at a coordinate, `None` when out of bounds.
    pub fn get_mut(&mut self, coord: GridCoord) -> Option<&mut T> {
        self.size.index_of(coord).and_then(|i| self.cells.get_mut(i))
    }

    /// Sets the cell at a coordinate. Returns false when out of bounds.
    pub fn set(&mut self, coord: GridCoord, value: T) -> bool {
        if let Some(slot) = self.get_mut(coord) {
            *slot = value;
            return true;
        }
        false
    }

    /// Returns a slice of all cells.
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Returns a mutable slice of all cells.
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterates over `(coord, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &T)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (size.coord_of(i), cell))
    }
}

impl<T: Copy> Grid<T> {
    /// Copies every cell from `other`, which must have the same dimensions.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.size, other.size);
        self.cells.copy_from_slice(&other.cells);
    }
}

/// Fails when a deserialized grid does not match the expected dimensions.
pub(crate) fn check_grid<T>(name: &'static str, grid: &Grid<T>, size: GridSize) -> Result<(), SnapshotError> {
    if grid.size() != size || !grid.is_consistent() {
        return Err(SnapshotError::GridSizeMismatch {
            grid: name,
            expected: size.area(),
            actual: grid.cells().len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut grid = Grid::filled(GridSize::new(4, 3), 0u8);
        assert!(grid.set(GridCoord::new(3, 2), 9));
        assert_eq!(grid.get(GridCoord::new(3, 2)), Some(&9));
        assert!(!grid.set(GridCoord::new(4, 0), 1));
        assert_eq!(grid.get(GridCoord::new(-1, 0)), None);
    }

    #[test]
    fn test_from_fn_row_major() {
        let grid = Grid::from_fn(GridSize::new(3, 2), |c| c.x + c.y * 10);
        assert_eq!(grid.cells(), &[0, 1, 2, 10, 11, 12]);
        assert!(grid.is_consistent());
    }

    #[test]
    fn test_iter_coords() {
        let grid = Grid::filled(GridSize::new(2, 2), 'a');
        let coords: Vec<_> = grid.iter().map(|(c, _)| c).collect();
        assert_eq!(coords[2], GridCoord::new(0, 1));
    }
}
