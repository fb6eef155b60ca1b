//! Scenario description loaded from TOML files or built from the bundled demo.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sightline_core::{CellCoord, VisionConfig};

const DEMO_SIZE: u32 = 50;
const DEMO_OBSERVER: [i32; 2] = [4, 5];
const DEMO_OBSTACLES: [[i32; 2]; 11] = [
    [3, 3],
    [4, 3],
    [5, 3],
    [8, 7],
    [8, 5],
    [6, 9],
    [6, 10],
    [6, 11],
    [7, 11],
    [7, 10],
    [7, 9],
];

/// Inputs for a single field-of-view query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Scenario {
    /// Number of cells along each grid edge.
    pub(crate) size: u32,
    /// Observer position as `[x, y]`.
    pub(crate) observer: [i32; 2],
    /// Opaque cells as `[x, y]` pairs.
    #[serde(default)]
    pub(crate) obstacles: Vec<[i32; 2]>,
    /// Vision tunables; omitted fields fall back to their defaults.
    #[serde(default)]
    pub(crate) vision: VisionConfig,
}

impl Scenario {
    /// Scenario shipped with the binary, used when no input is supplied.
    #[must_use]
    pub(crate) fn demo() -> Self {
        Self {
            size: DEMO_SIZE,
            observer: DEMO_OBSERVER,
            obstacles: DEMO_OBSTACLES.to_vec(),
            vision: VisionConfig::default(),
        }
    }

    /// Reads and parses a scenario file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load scenario file {}", path.display()))
    }

    /// Parses a scenario from TOML text.
    pub(crate) fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse scenario toml contents")
    }

    /// Observer position as a grid coordinate.
    #[must_use]
    pub(crate) fn observer_coord(&self) -> CellCoord {
        to_coord(self.observer)
    }

    /// Obstacles as grid coordinates.
    #[must_use]
    pub(crate) fn obstacle_coords(&self) -> Vec<CellCoord> {
        self.obstacles.iter().copied().map(to_coord).collect()
    }
}

fn to_coord([x, y]: [i32; 2]) -> CellCoord {
    CellCoord::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::SIGHT_RADIUS;

    #[test]
    fn demo_matches_bundled_layout() {
        let demo = Scenario::demo();
        assert_eq!(demo.size, 50);
        assert_eq!(demo.observer_coord(), CellCoord::new(4, 5));
        assert_eq!(demo.obstacle_coords().len(), 11);
        assert_eq!(demo.vision.sight_radius, SIGHT_RADIUS);
    }

    #[test]
    fn parses_full_scenario() {
        let scenario = Scenario::from_toml_str(
            r#"
            size = 12
            observer = [2, 3]
            obstacles = [[1, 1], [4, 5]]

            [vision]
            sight_radius = 6
            "#,
        )
        .expect("valid scenario");

        assert_eq!(scenario.size, 12);
        assert_eq!(scenario.observer_coord(), CellCoord::new(2, 3));
        assert_eq!(
            scenario.obstacle_coords(),
            vec![CellCoord::new(1, 1), CellCoord::new(4, 5)]
        );
        assert_eq!(scenario.vision, VisionConfig::new(6));
    }

    #[test]
    fn optional_sections_use_defaults() {
        let scenario =
            Scenario::from_toml_str("size = 5\nobserver = [0, 0]\n").expect("valid scenario");

        assert!(scenario.obstacles.is_empty());
        assert_eq!(scenario.vision, VisionConfig::default());
    }

    #[test]
    fn missing_observer_is_an_error() {
        let error = Scenario::from_toml_str("size = 5\n").expect_err("observer is required");
        assert!(error.to_string().contains("scenario toml"));
    }
}
