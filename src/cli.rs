use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Palmer drought index accounting for a single location.
#[derive(Parser)]
#[command(
    name = "palmer",
    version,
    about = "Palmer drought severity (PDSI/PMDI) accounting"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compute the modified Palmer index over a location's record.
    Index(IndexArgs),
    /// Advance the spell accounting by a single period.
    Step(StepArgs),
}

/// Arguments for the `index` subcommand.
#[derive(clap::Args)]
pub struct IndexArgs {
    /// Path to TOML site configuration file.
    #[arg(short, long, default_value = "palmer.toml")]
    pub config: PathBuf,

    /// Path to TOML input series (`[[period]]` tables).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for JSON output. Written to stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `step` subcommand.
#[derive(clap::Args)]
pub struct StepArgs {
    /// Period type tag (week, month or pentad).
    #[arg(short, long)]
    pub period: String,

    /// Z-index of the period.
    #[arg(short, long, allow_negative_numbers = true)]
    pub z: f64,

    /// Prior potential wet spell.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x1: f64,

    /// Prior potential dry spell.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x2: f64,

    /// Prior established spell.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x3: f64,

    /// Prior accumulated effective wetness/dryness.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub uaccum: f64,
}
