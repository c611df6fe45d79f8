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
    author = "The cubefold developers",
    version,
    about = "cubefold - Exhaustive folding search for snake cube puzzles.",
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

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search every configuration of a chain for the widest and the compact folding.
    Search(SearchArgs),
    /// Place and validate a single configuration of a chain.
    Inspect(InspectArgs),
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Chain to fold: a preset name (e.g., 'canonical') or a path to a chain TOML file.
    #[arg(long, value_name = "NAME_OR_PATH")]
    pub chain: Option<String>,

    /// Path to a search configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Search Overrides ---
    /// How step numbers map to orientations ('per-chain-index' or 'per-corner').
    #[arg(short, long, value_name = "STRATEGY")]
    pub decoding: Option<String>,

    /// Only search steps in START..END instead of the whole space.
    #[arg(short, long, value_name = "START..END")]
    pub range: Option<String>,

    /// Extents a compact folding must have, as 'X,Y,Z' or a single value for a cube.
    #[arg(long, value_name = "X,Y,Z")]
    pub compact_extents: Option<String>,

    /// Which of several equally wide foldings to keep ('first-wins' or 'last-wins').
    #[arg(long, value_name = "POLICY")]
    pub widest_tie_break: Option<String>,

    /// Which of several compact foldings to keep ('first-wins' or 'last-wins').
    #[arg(long, value_name = "POLICY")]
    pub compact_tie_break: Option<String>,

    /// Stop at the first compact folding. Runs on a single thread.
    #[arg(long)]
    pub stop_on_compact: bool,

    /// Number of steps handed to each worker at a time.
    #[arg(long, value_name = "INT")]
    pub chunk_size: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.decoding=per-corner
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,

    // --- Output ---
    /// Directory to write both foldings (CSV) and a search summary (TOML) to.
    #[arg(short, long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Step to decode. Without one, the chain's resting pose is inspected.
    #[arg(value_name = "STEP")]
    pub step: Option<u64>,

    /// Chain to fold: a preset name (e.g., 'canonical') or a path to a chain TOML file.
    #[arg(long, value_name = "NAME_OR_PATH", default_value = "canonical")]
    pub chain: String,

    /// How STEP maps to orientations ('per-chain-index' or 'per-corner').
    /// Only valid with a STEP; the resting pose is always reported per corner.
    #[arg(
        short,
        long,
        value_name = "STRATEGY",
        default_value = "per-chain-index",
        requires = "step"
    )]
    pub decoding: String,

    /// Write the placement to a CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}
