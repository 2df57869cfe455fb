//! [`OccupancyRegistry`] – cells currently held by rovers.
//!
//! The coordinator seeds a fresh registry with every rover's cell at the
//! start of a navigation pass and threads it by `&mut` through each rover's
//! `navigate` call. A rover's own cell is vacated while it moves so that it
//! never collides with itself.

use std::collections::HashSet;

use rover_types::GridCell;

/// Set of occupied plateau cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyRegistry {
    cells: HashSet<GridCell>,
}

impl OccupancyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry holding every cell yielded by `cells`.
    pub fn seeded(cells: impl IntoIterator<Item = GridCell>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Mark `cell` as occupied.  Returns `false` if it already was.
    pub fn occupy(&mut self, cell: GridCell) -> bool {
        self.cells.insert(cell)
    }

    /// Release `cell`.  Returns `false` if it was not occupied.
    pub fn vacate(&mut self, cell: GridCell) -> bool {
        self.cells.remove(&cell)
    }

    pub fn is_occupied(&self, cell: GridCell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Occupied cells in `(x, y)` order.
    pub fn occupied_cells(&self) -> Vec<GridCell> {
        let mut cells: Vec<GridCell> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }
}
