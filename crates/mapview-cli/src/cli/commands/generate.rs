//! Generate command: symmetric map from five segments.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mapview_core::generate::{self, DEFAULT_OUTPUT_NAME};
use rand::RngCore;

use super::write_stdout;
use crate::cli::Settings;

/// `generated-map.txt` next to the segments directory.
pub fn default_output(segments_dir: &Path) -> PathBuf {
    match segments_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(DEFAULT_OUTPUT_NAME),
        _ => PathBuf::from(DEFAULT_OUTPUT_NAME),
    }
}

pub fn run(settings: &Settings, output: Option<PathBuf>, rng: &mut dyn RngCore) -> Result<()> {
    let map = generate::generate(&settings.segments_dir, settings.center, rng)
        .context("generate map")?;
    let output = output.unwrap_or_else(|| default_output(&settings.segments_dir));

    generate::save(&map, &output)?;

    let mut report = generate::render_report(&map);
    report.push_str(&format!("  Map saved to: {}\n\n", output.display()));
    write_stdout(&report)
}
