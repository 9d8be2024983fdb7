//! CLI command handlers.

pub mod config;
pub mod generate;
pub mod preview;

use std::io::Write;

use anyhow::{Context, Result};

/// Writes fully rendered text to stdout in one call.
fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("write to stdout")?;
    stdout.flush().context("flush stdout")
}
