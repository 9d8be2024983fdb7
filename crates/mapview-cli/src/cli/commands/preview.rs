//! Preview command: nine segments in a shuffled 3x3 grid.

use anyhow::{Context, Result};
use mapview_core::grid::Grid;
use mapview_core::render::render_preview;
use mapview_core::segment;
use rand::RngCore;

use super::write_stdout;
use crate::cli::Settings;

pub fn run(settings: &Settings, rng: &mut dyn RngCore) -> Result<()> {
    // Everything is loaded and rendered before the first byte hits stdout.
    let segments = segment::load_all(&settings.segments_dir).context("load segments")?;

    let grid = Grid::arrange(settings.center, rng);
    tracing::debug!(rows = ?grid.rows(), "arranged grid");

    let output = render_preview(&grid, &segments, settings.cell_size)?;
    write_stdout(&output)
}
