#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Sightline adapters.

use anyhow::Result as AnyResult;
use sightline_core::{CellCoord, CellState};
use sightline_grid::{query, Grid};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Visual descriptor for a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPresentation {
    /// Character used by text backends.
    pub glyph: char,
    /// Fill color used by graphical backends.
    pub color: Color,
}

impl CellPresentation {
    /// Creates a new cell descriptor.
    #[must_use]
    pub const fn new(glyph: char, color: Color) -> Self {
        Self { glyph, color }
    }
}

/// Mapping from [`CellState`] to its visual descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    empty: CellPresentation,
    blocked: CellPresentation,
    visible: CellPresentation,
    observer: CellPresentation,
}

impl Palette {
    /// Creates a palette, rejecting glyph collisions that would make text output ambiguous.
    pub fn new(
        empty: CellPresentation,
        blocked: CellPresentation,
        visible: CellPresentation,
        observer: CellPresentation,
    ) -> Result<Self, RenderingError> {
        let glyphs = [empty.glyph, blocked.glyph, visible.glyph, observer.glyph];
        for (index, glyph) in glyphs.iter().enumerate() {
            if glyphs[..index].contains(glyph) {
                return Err(RenderingError::DuplicateGlyph { glyph: *glyph });
            }
        }

        Ok(Self {
            empty,
            blocked,
            visible,
            observer,
        })
    }

    /// Descriptor used for cells in the provided state.
    #[must_use]
    pub const fn presentation_for(&self, state: CellState) -> CellPresentation {
        match state {
            CellState::Empty => self.empty,
            CellState::Blocked => self.blocked,
            CellState::Visible => self.visible,
            CellState::Observer => self.observer,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let floor = Color::from_rgb_u8(40, 40, 48);
        Self {
            empty: CellPresentation::new('.', floor),
            blocked: CellPresentation::new('#', Color::from_rgb_u8(0, 0, 0)),
            visible: CellPresentation::new('+', floor.lighten(0.6)),
            observer: CellPresentation::new('@', Color::from_rgb_u8(220, 60, 60)),
        }
    }
}

/// Renderer-neutral snapshot of a computed field of view.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    size: u32,
    rows: Vec<Vec<CellPresentation>>,
}

impl Scene {
    /// Builds a scene from the grid's current cell states.
    #[must_use]
    pub fn from_grid(grid: &Grid, palette: &Palette) -> Self {
        let rows: Vec<Vec<CellPresentation>> = query::rows(grid)
            .map(|row| {
                row.iter()
                    .map(|state| palette.presentation_for(*state))
                    .collect()
            })
            .collect();

        Self {
            size: grid.size(),
            rows,
        }
    }

    /// Number of cells along each edge of the scene.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Rows of cell descriptors ordered top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellPresentation>] {
        &self.rows
    }

    /// Descriptor for a single cell, if it lies within the scene.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&CellPresentation> {
        let x = usize::try_from(coord.x()).ok()?;
        let y = usize::try_from(coord.y()).ok()?;
        self.rows.get(y)?.get(x)
    }

    /// Renders the scene as newline-terminated text rows.
    #[must_use]
    pub fn to_ascii(&self) -> String {
        let mut text = String::with_capacity(self.rows.len() * (self.rows.len() + 1));
        for row in &self.rows {
            text.extend(row.iter().map(|cell| cell.glyph));
            text.push('\n');
        }
        text
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Heading shown alongside the scene.
    pub title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Sightline scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, presentation: &Presentation) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// Two cell states were assigned the same glyph.
    DuplicateGlyph {
        /// Glyph that appeared more than once.
        glyph: char,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGlyph { glyph } => {
                write!(f, "glyph '{glyph}' is assigned to more than one cell state")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_channels_towards_white() {
        let color = Color::from_rgb_u8(0, 0, 0).lighten(0.5);
        assert!((color.red - 0.5).abs() < 1e-6);
        assert!((color.alpha - 1.0).abs() < 1e-6);
    }

    #[test]
    fn palette_rejects_duplicate_glyphs() {
        let color = Color::from_rgb_u8(0, 0, 0);
        let error = Palette::new(
            CellPresentation::new('.', color),
            CellPresentation::new('#', color),
            CellPresentation::new('.', color),
            CellPresentation::new('@', color),
        )
        .expect_err("duplicate glyph");

        assert_eq!(error, RenderingError::DuplicateGlyph { glyph: '.' });
    }

    #[test]
    fn scene_ascii_mirrors_grid_rows() {
        let mut grid = Grid::new(3, [CellCoord::new(1, 0)]).expect("valid grid");
        grid.set(CellCoord::new(0, 1), CellState::Visible);
        grid.mark_observer(CellCoord::new(1, 1));

        let scene = Scene::from_grid(&grid, &Palette::default());

        assert_eq!(scene.size(), 3);
        assert_eq!(scene.to_ascii(), ".#.\n+@.\n...\n");
        assert_eq!(
            scene.cell(CellCoord::new(1, 0)).map(|cell| cell.glyph),
            Some('#')
        );
        assert!(scene.cell(CellCoord::new(3, 0)).is_none());
    }

    #[test]
    fn presentation_keeps_title_and_scene() {
        let grid = Grid::new(1, []).expect("valid grid");
        let scene = Scene::from_grid(&grid, &Palette::default());
        let presentation = Presentation::new("fov", scene.clone());

        assert_eq!(presentation.title, "fov");
        assert_eq!(presentation.scene, scene);
    }
}
