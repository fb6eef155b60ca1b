#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Recursive shadowcasting system that marks the cells an observer can see.
//!
//! Each quadrant is swept ring by ring outward from the observer. A ring is the
//! set of cells at a fixed forward distance, and the lateral offsets still worth
//! checking on it are bounded by a [`ViewArc`] of slopes. Hitting an obstacle
//! splits the sweep: the part of the arc before the obstacle continues into the
//! next ring immediately, and the rest of the current ring resumes just past it.
//! Cells behind the obstacle fall outside both pieces and stay unseen.

use log::{debug, trace};
use sightline_core::{CellCoord, CellState, GridError, Quadrant, VisionConfig};
use sightline_grid::{query, Grid};

/// Slope bounds of the lateral offsets still visible at a given ring.
///
/// Slopes are offset-to-distance ratios, so `[-1, 1]` spans a full 90° quadrant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewArc {
    /// Lower slope bound.
    pub min: f64,
    /// Upper slope bound.
    pub max: f64,
}

impl ViewArc {
    /// Arc covering an entire quadrant.
    pub const FULL: ViewArc = ViewArc::new(-1.0, 1.0);

    /// Creates an arc from explicit slope bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Reports whether the arc has zero or negative width.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.min >= self.max
    }
}

/// Marks every unobstructed cell of one quadrant starting at ring `distance`.
///
/// Scanning stops once `distance` reaches `sight_radius` or the arc collapses.
/// Ring zero is the observer's own cell and is always treated as open.
pub fn scan(
    grid: &mut Grid,
    observer: CellCoord,
    distance: u32,
    arc: ViewArc,
    quadrant: Quadrant,
    sight_radius: u32,
) {
    let mut sweep = QuadrantSweep {
        grid,
        observer,
        quadrant,
        sight_radius,
    };
    sweep.scan(distance, arc);
}

struct QuadrantSweep<'grid> {
    grid: &'grid mut Grid,
    observer: CellCoord,
    quadrant: Quadrant,
    sight_radius: u32,
}

impl QuadrantSweep<'_> {
    fn scan(&mut self, distance: u32, arc: ViewArc) {
        if distance >= self.sight_radius || arc.is_degenerate() {
            return;
        }

        if distance == 0 {
            self.reveal(self.observer);
            self.scan(1, arc);
            return;
        }

        let depth = f64::from(distance);
        let ring = i32::try_from(distance).unwrap_or(i32::MAX);
        let first = (depth * arc.min).ceil() as i32;
        let last = (depth * arc.max).floor() as i32;
        let mut min = arc.min;

        for offset in first..=last {
            let (dx, dy) = self.quadrant.transform(ring, offset);
            let cell = self.observer.offset(dx, dy);

            if self.grid.get(cell).is_blocked() {
                let lateral = f64::from(offset);
                let shadow_edge = (lateral - 0.5) / depth;
                trace!(
                    "{:?} ring {distance}: obstacle at ({}, {}) splits arc at {shadow_edge:.3}",
                    self.quadrant,
                    cell.x(),
                    cell.y()
                );
                self.scan(distance + 1, ViewArc::new(min, shadow_edge));
                min = (lateral + 0.5) / depth;
            } else {
                self.reveal(cell);
            }
        }

        self.scan(distance + 1, ViewArc::new(min, arc.max));
    }

    fn reveal(&mut self, cell: CellCoord) {
        if !self.grid.get(cell).is_blocked() {
            self.grid.set(cell, CellState::Visible);
        }
    }
}

/// Field-of-view driver that sweeps all four quadrants around an observer.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShadowCaster {
    config: VisionConfig,
}

impl ShadowCaster {
    /// Creates a shadowcaster using the provided vision configuration.
    #[must_use]
    pub const fn new(config: VisionConfig) -> Self {
        Self { config }
    }

    /// Configuration applied to every sweep.
    #[must_use]
    pub const fn config(&self) -> VisionConfig {
        self.config
    }

    /// Marks every cell the observer can see, then places the observer marker.
    ///
    /// Fails without touching the grid when the observer lies outside it.
    pub fn illuminate(&self, grid: &mut Grid, observer: CellCoord) -> Result<(), GridError> {
        if !grid.contains(observer) {
            return Err(GridError::ObserverOutOfBounds {
                coord: observer,
                size: grid.size(),
            });
        }

        for quadrant in Quadrant::ALL {
            debug!(
                "sweeping {quadrant:?} quadrant from ({}, {}) with radius {}",
                observer.x(),
                observer.y(),
                self.config.sight_radius
            );
            scan(
                grid,
                observer,
                0,
                ViewArc::FULL,
                quadrant,
                self.config.sight_radius,
            );
        }
        grid.mark_observer(observer);

        let counts = query::state_counts(grid);
        debug!(
            "field of view complete: {} visible, {} blocked, {} unseen",
            counts.visible, counts.blocked, counts.empty
        );
        Ok(())
    }
}

/// Builds a grid, computes the observer's field of view and returns the grid.
pub fn compute_field_of_view<I>(
    size: u32,
    obstacles: I,
    observer: CellCoord,
    config: VisionConfig,
) -> Result<Grid, GridError>
where
    I: IntoIterator<Item = CellCoord>,
{
    let mut grid = Grid::new(size, obstacles)?;
    ShadowCaster::new(config).illuminate(&mut grid, observer)?;
    Ok(grid)
}
