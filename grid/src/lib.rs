#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bounded occupancy grid that stores the per-cell visibility state.
//!
//! Reads outside the grid resolve to [`CellState::Blocked`] so the grid edges
//! behave like opaque walls, and writes outside the grid are dropped. Neither
//! operation can fail once the grid has been constructed; all validation
//! happens in [`Grid::new`].

use log::{debug, warn};
use sightline_core::{CellCoord, CellState, GridError};

/// Dense square grid of [`CellState`] values stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocates a `size × size` grid and blocks every provided obstacle.
    ///
    /// Fails when `size` is zero or any obstacle lies outside `[0, size)`.
    /// Duplicate obstacles are accepted.
    pub fn new<I>(size: u32, obstacles: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }

        let side = usize::try_from(size).map_err(|_| GridError::ZeroSize)?;
        let mut grid = Self {
            size,
            cells: vec![CellState::Empty; side * side],
        };

        let mut blocked = 0_usize;
        for obstacle in obstacles {
            let index = grid
                .index(obstacle)
                .ok_or(GridError::ObstacleOutOfBounds {
                    coord: obstacle,
                    size,
                })?;
            grid.cells[index] = CellState::Blocked;
            blocked += 1;
        }

        debug!("allocated {size}x{size} grid with {blocked} obstacles");
        Ok(grid)
    }

    /// Number of cells along each edge of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.index(coord).is_some()
    }

    /// State stored at the coordinate, or [`CellState::Blocked`] outside the grid.
    #[must_use]
    pub fn get(&self, coord: CellCoord) -> CellState {
        self.index(coord)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(CellState::Blocked)
    }

    /// Overwrites the state stored at the coordinate. Out-of-bounds writes are ignored.
    pub fn set(&mut self, coord: CellCoord, state: CellState) {
        if let Some(cell) = self.index(coord).and_then(|index| self.cells.get_mut(index)) {
            *cell = state;
        }
    }

    /// Places the observer marker on its cell after scanning.
    ///
    /// The marker replaces whatever state the cell held, obstacles included.
    pub fn mark_observer(&mut self, coord: CellCoord) {
        if self.get(coord).is_blocked() && self.contains(coord) {
            warn!(
                "observer at ({}, {}) overwrites a blocked cell",
                coord.x(),
                coord.y()
            );
        }
        self.set(coord, CellState::Observer);
    }

    /// Clears every visibility and observer marking while keeping obstacles.
    pub fn reset_visibility(&mut self) {
        for cell in &mut self.cells {
            if matches!(cell, CellState::Visible | CellState::Observer) {
                *cell = CellState::Empty;
            }
        }
    }

    fn index(&self, coord: CellCoord) -> Option<usize> {
        let x = u32::try_from(coord.x()).ok()?;
        let y = u32::try_from(coord.y()).ok()?;
        if x >= self.size || y >= self.size {
            return None;
        }

        let side = usize::try_from(self.size).ok()?;
        let column = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        row.checked_mul(side)?.checked_add(column)
    }
}

/// Query functions that provide read-only access to a grid.
pub mod query {
    use super::Grid;
    use sightline_core::{CellCoord, CellState};

    /// Iterates the grid one row at a time, top to bottom.
    pub fn rows(grid: &Grid) -> impl Iterator<Item = &[CellState]> {
        let side = usize::try_from(grid.size).unwrap_or(usize::MAX);
        grid.cells.chunks(side)
    }

    /// Enumerates every coordinate together with its state in row-major order.
    pub fn cells(grid: &Grid) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        rows(grid).enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, state)| {
                let coord = CellCoord::new(
                    i32::try_from(x).unwrap_or(i32::MAX),
                    i32::try_from(y).unwrap_or(i32::MAX),
                );
                (coord, *state)
            })
        })
    }

    /// Collects the cells the scanner marked visible in row-major order.
    #[must_use]
    pub fn visible_cells(grid: &Grid) -> Vec<CellCoord> {
        cells(grid)
            .filter(|(_, state)| state.is_visible())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Locates the observer marker, if one has been placed.
    #[must_use]
    pub fn observer(grid: &Grid) -> Option<CellCoord> {
        cells(grid)
            .find(|(_, state)| *state == CellState::Observer)
            .map(|(coord, _)| coord)
    }

    /// Tallies how many cells hold each state.
    #[must_use]
    pub fn state_counts(grid: &Grid) -> StateCounts {
        let mut counts = StateCounts::default();
        for (_, state) in cells(grid) {
            match state {
                CellState::Empty => counts.empty += 1,
                CellState::Blocked => counts.blocked += 1,
                CellState::Visible => counts.visible += 1,
                CellState::Observer => counts.observer += 1,
            }
        }
        counts
    }

    /// Number of cells holding each [`CellState`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct StateCounts {
        /// Cells that remain unseen open terrain.
        pub empty: usize,
        /// Cells occupied by obstacles.
        pub blocked: usize,
        /// Cells marked visible by the scanner.
        pub visible: usize,
        /// Cells carrying the observer marker.
        pub observer: usize,
    }

    impl StateCounts {
        /// Total number of cells accounted for.
        #[must_use]
        pub const fn total(&self) -> usize {
            self.empty + self.blocked + self.visible + self.observer
        }
    }
}
