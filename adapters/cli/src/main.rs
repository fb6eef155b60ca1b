#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that computes and prints an observer's field of view.

mod layout_transfer;
mod scenario;
mod terminal;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use sightline_core::{CellCoord, VisionConfig};
use sightline_rendering::{Palette, Presentation, RenderingBackend, Scene};
use sightline_system_shadowcast::compute_field_of_view;

use self::{layout_transfer::LayoutSnapshot, scenario::Scenario, terminal::TerminalBackend};

/// Computes which grid cells an observer can see and prints them as text.
#[derive(Debug, Parser)]
#[command(name = "sightline", version)]
struct Cli {
    /// TOML scenario file describing the grid, observer and obstacles.
    #[arg(long, value_name = "PATH", conflicts_with = "layout")]
    scenario: Option<PathBuf>,
    /// Encoded layout string previously produced with `--export`.
    #[arg(long, value_name = "STRING")]
    layout: Option<String>,
    /// Overrides the number of cells along each grid edge.
    #[arg(long)]
    size: Option<u32>,
    /// Overrides the observer position, given as `X,Y`.
    #[arg(long, value_name = "X,Y", value_parser = parse_coord)]
    observer: Option<CellCoord>,
    /// Replaces the obstacle list; repeat for each opaque cell, given as `X,Y`.
    #[arg(long = "obstacle", value_name = "X,Y", value_parser = parse_coord)]
    obstacles: Vec<CellCoord>,
    /// Overrides the maximum ring distance scanned around the observer.
    #[arg(long)]
    radius: Option<u32>,
    /// Prints the encoded layout string instead of the field of view.
    #[arg(long)]
    export: bool,
    /// Raises log verbosity; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn resolve_scenario(&self) -> Result<Scenario> {
        let mut scenario = if let Some(layout) = &self.layout {
            let snapshot = LayoutSnapshot::decode(layout).context("invalid --layout string")?;
            Scenario::from(snapshot)
        } else if let Some(path) = &self.scenario {
            Scenario::load(path)?
        } else {
            info!("no scenario supplied, using the bundled demo");
            Scenario::demo()
        };

        if let Some(size) = self.size {
            scenario.size = size;
        }
        if let Some(observer) = self.observer {
            scenario.observer = [observer.x(), observer.y()];
        }
        if !self.obstacles.is_empty() {
            scenario.obstacles = self
                .obstacles
                .iter()
                .map(|coord| [coord.x(), coord.y()])
                .collect();
        }
        if let Some(radius) = self.radius {
            scenario.vision = VisionConfig::new(radius);
        }

        Ok(scenario)
    }
}

/// Entry point for the Sightline command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let scenario = cli.resolve_scenario()?;

    if cli.export {
        let encoded = LayoutSnapshot::from(&scenario)
            .encode()
            .context("failed to encode layout")?;
        println!("{encoded}");
        return Ok(());
    }

    let observer = scenario.observer_coord();
    let grid = compute_field_of_view(
        scenario.size,
        scenario.obstacle_coords(),
        observer,
        scenario.vision,
    )
    .context("invalid field-of-view query")?;

    let title = format!(
        "field of view from ({}, {}), radius {}",
        observer.x(),
        observer.y(),
        scenario.vision.sight_radius
    );
    let scene = Scene::from_grid(&grid, &Palette::default());
    TerminalBackend::stdout().present(&Presentation::new(title, scene))
}

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("failed to install logger")
}

fn parse_coord(value: &str) -> Result<CellCoord, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{value}'"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid x coordinate '{x}': {error}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|error| format!("invalid y coordinate '{y}': {error}"))?;
    Ok(CellCoord::new(x, y))
}
