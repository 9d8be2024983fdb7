//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mapview_core::config;
use mapview_core::pad::CellSize;
use mapview_core::segment::SegmentId;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

mod commands;

#[derive(Parser)]
#[command(name = "mapview")]
#[command(version)]
#[command(about = "Preview and generate 3x3 tile maps from segment files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding segment-1.txt .. segment-9.txt (overrides config)
    #[arg(long, value_name = "DIR")]
    segments_dir: Option<PathBuf>,

    /// Seed for the random arrangement (random when omitted)
    #[arg(long, env = "MAPVIEW_SEED")]
    seed: Option<u64>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print all nine segments in a shuffled 3x3 grid (default)
    Preview,
    /// Build a mirrored map from five segments and save it
    Generate {
        /// Where to write the map (default: generated-map.txt next to the segments dir)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
}

/// Values the map commands need, resolved once at startup.
///
/// Flags win over the config file, which wins over built-in defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub segments_dir: PathBuf,
    pub center: SegmentId,
    pub cell_size: CellSize,
}

impl Settings {
    fn resolve(config: &config::Config, segments_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            segments_dir: segments_dir.unwrap_or_else(|| config.segments_dir.clone()),
            center: config.center()?,
            cell_size: config.cell_size(),
        })
    }
}

fn make_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => {
            tracing::debug!(seed, "using seeded rng");
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(rand::rng()),
    }
}

/// Config file values plus flag overrides. Only map commands need this, so a
/// broken config file never blocks `config path` or `config init`.
fn load_settings(segments_dir: Option<PathBuf>) -> Result<Settings> {
    let config = config::Config::load().context("load config")?;
    let settings = Settings::resolve(&config, segments_dir)?;
    tracing::debug!(?settings, "resolved settings");
    Ok(settings)
}

pub fn run() -> Result<()> {
    let Cli {
        command,
        segments_dir,
        seed,
    } = Cli::parse();

    // default to preview mode
    match command.unwrap_or(Commands::Preview) {
        Commands::Preview => {
            let settings = load_settings(segments_dir)?;
            commands::preview::run(&settings, make_rng(seed).as_mut())
        }
        Commands::Generate { output } => {
            let settings = load_settings(segments_dir)?;
            commands::generate::run(&settings, output, make_rng(seed).as_mut())
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}
