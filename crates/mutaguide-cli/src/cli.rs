use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Akshaj Darbar",
    version,
    about = "MutaGuide CLI - Ranks candidate residue positions for mutagenesis from homology conservation, secondary structure, and solvent accessibility.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the positions of a target residue for replacement, best candidates first.
    Rank(RankArgs),
}

/// Arguments for the `rank` subcommand.
#[derive(Args, Debug)]
pub struct RankArgs {
    // --- Core Arguments ---
    /// Path to the alignment file (Phyre2 FASTA output; reference sequence first).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Single-letter code of the residue targeted for replacement.
    #[arg(short = 'r', long, required = true, value_name = "CHAR")]
    pub target_residue: char,

    /// Do not favor surface-exposed positions when scoring.
    #[arg(long)]
    pub no_surface: bool,

    /// Write the full report to this file in addition to printing it.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Predictor Overrides ---
    /// Override the predictor submission URL from the config file.
    #[arg(long, value_name = "URL")]
    pub predictor_url: Option<String>,

    /// Override the interval between predictor status checks, in seconds.
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Override the maximum number of predictor status checks.
    #[arg(long, value_name = "NUM")]
    pub max_checks: Option<u32>,
}
