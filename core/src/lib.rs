#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sightline field-of-view engine.
//!
//! This crate defines the vocabulary that connects the grid, the shadowcasting
//! system and the adapters. The grid stores one [`CellState`] per
//! [`CellCoord`], the shadowcaster sweeps the grid one [`Quadrant`] at a time
//! using the radius configured in [`VisionConfig`], and adapters read the
//! resulting states back for presentation. Malformed input is reported through
//! [`GridError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum ring distance scanned around the observer.
pub const SIGHT_RADIUS: u32 = 10;

/// Visibility classification of a single grid cell.
///
/// States are mutually exclusive: a cell holds exactly one of them at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Open terrain that has not been seen by the observer.
    #[default]
    Empty,
    /// Opaque terrain. Also reported for every coordinate outside the grid.
    Blocked,
    /// Open terrain with an unobstructed line of sight to the observer.
    Visible,
    /// Cell occupied by the observer after the scan has completed.
    Observer,
}

impl CellState {
    /// Reports whether the state occludes line of sight.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Reports whether the scanner marked the cell as visible.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Location of a single grid cell expressed as signed column and row coordinates.
///
/// Coordinates are signed because the scanner routinely probes cells beyond the
/// grid edges; the grid decides how such probes resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: i32,
    y: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate displaced by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Computes the Chebyshev (king-move) distance between two coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl From<(i32, i32)> for CellCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// One of the four 90° rotations used to reuse a single scan routine for every
/// compass direction.
///
/// Rows grow downward, so `North` sweeps toward decreasing `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Identity transform, forward axis `+x`.
    East,
    /// `(x, y) -> (y, -x)`, forward axis `-y`.
    North,
    /// `(x, y) -> (-x, -y)`, forward axis `-x`.
    West,
    /// `(x, y) -> (-y, x)`, forward axis `+y`.
    South,
}

impl Quadrant {
    /// The four quadrants in the order the shadowcaster sweeps them.
    ///
    /// Together they tile the full circle around the observer.
    pub const ALL: [Quadrant; 4] = [Self::East, Self::North, Self::West, Self::South];

    /// Maps a canonical `(depth, offset)` pair into a grid displacement.
    ///
    /// `depth` is the forward distance from the observer and `offset` the
    /// lateral displacement across the current ring.
    #[must_use]
    pub const fn transform(self, depth: i32, offset: i32) -> (i32, i32) {
        match self {
            Self::East => (depth, offset),
            Self::North => (offset, -depth),
            Self::West => (-depth, -offset),
            Self::South => (-offset, depth),
        }
    }

    /// Unit displacement along the quadrant's forward axis.
    #[must_use]
    pub const fn forward(self) -> (i32, i32) {
        self.transform(1, 0)
    }
}

/// Tunables applied to a visibility query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Maximum ring distance scanned; rings at or beyond it stay unseen.
    pub sight_radius: u32,
}

impl VisionConfig {
    /// Creates a configuration with an explicit sight radius.
    #[must_use]
    pub const fn new(sight_radius: u32) -> Self {
        Self { sight_radius }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self::new(SIGHT_RADIUS)
    }
}

/// Broad category of a [`GridError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller supplied a dimension or coordinate the grid cannot represent.
    InvalidArgument,
}

/// Errors reported while validating a visibility query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid dimension was zero.
    #[error("grid size must be positive")]
    ZeroSize,
    /// An obstacle lies outside the grid.
    #[error("obstacle at ({}, {}) lies outside the {size}x{size} grid", .coord.x(), .coord.y())]
    ObstacleOutOfBounds {
        /// Offending obstacle coordinate.
        coord: CellCoord,
        /// Dimension of the grid the obstacle was validated against.
        size: u32,
    },
    /// The observer lies outside the grid.
    #[error("observer at ({}, {}) lies outside the {size}x{size} grid", .coord.x(), .coord.y())]
    ObserverOutOfBounds {
        /// Offending observer coordinate.
        coord: CellCoord,
        /// Dimension of the grid the observer was validated against.
        size: u32,
    },
}

impl GridError {
    /// Category the error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroSize | Self::ObstacleOutOfBounds { .. } | Self::ObserverOutOfBounds { .. } => {
                ErrorKind::InvalidArgument
            }
        }
    }
}
