//! RegionWatch CLI: replay positions against region files.
//!
//! Usage:
//!   regionwatch replay <REGIONS>     Feed positions through a tracker and print transitions
//!   regionwatch expand <REGIONS>     Print the continuous-mode layout of a region file
//!   regionwatch query <REGIONS>      Look regions up by position or data
//!   regionwatch fader                Print which item a timed fader shows over time

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use regionwatch_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "regionwatch",
    about = "Track a moving position across numeric regions",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/regionwatch/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed positions through a tracker and print every transition
    Replay {
        /// Region file (JSON)
        regions: PathBuf,

        /// Positions file, one number per line ("-" or absent reads stdin)
        #[arg(short, long)]
        positions: Option<PathBuf>,

        /// Force continuous mode on
        #[arg(long)]
        continuous: bool,

        /// Override the tracked range's upper bound
        #[arg(long)]
        max: Option<f64>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Print the expanded (gapless) layout of a region file
    Expand {
        /// Region file (JSON)
        regions: PathBuf,

        /// Override the tracked range's upper bound
        #[arg(long)]
        max: Option<f64>,
    },

    /// Look regions up by position or by data
    Query {
        /// Region file (JSON)
        regions: PathBuf,

        /// List regions covering this position
        #[arg(long, conflicts_with = "data", required_unless_present = "data")]
        at: Option<f64>,

        /// Find the first region carrying this data (integer or label)
        #[arg(long)]
        data: Option<String>,
    },

    /// Print which item a timed fader shows as the timecode moves
    Fader {
        /// Item start times in seconds, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        timings: Vec<f64>,

        /// How long the last item stays up (milliseconds)
        #[arg(long, default_value = "10000")]
        tail_ms: f64,

        /// Timecodes in milliseconds, one per line ("-" or absent reads stdin)
        #[arg(short, long)]
        positions: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    regionwatch_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Replay {
            regions,
            positions,
            continuous,
            max,
            json,
        } => commands::replay::run(regions, positions, continuous, max, json, &config.tracker),
        Commands::Expand { regions, max } => commands::expand::run(regions, max, &config.tracker),
        Commands::Query { regions, at, data } => {
            commands::query::run(regions, at, data, &config.tracker)
        }
        Commands::Fader {
            timings,
            tail_ms,
            positions,
        } => commands::fader::run(timings, tail_ms, positions),
    }
}
