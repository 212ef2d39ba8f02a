use crate::utils::parser::parse_cell;
use clap::{Args, Parser, Subcommand};
use nanolysis::core::geometry::Cell;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Aravinthen Rajkumar",
    version,
    about = "nanolysis - post-processing of coarse-grained polymer MD dumps: select beads by chain, type or cell and write reduced snapshots.",
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

    /// Set the number of threads used to process dump files in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reduce every dump file in a directory to the selected beads.
    Reduce(ReduceArgs),
    /// Print the bounding box of the beads in one dump file.
    Bounds(BoundsArgs),
}

/// Arguments for the `reduce` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ReduceArgs {
    // --- Core Arguments ---
    /// Path to the origin file mapping every bead to its chain.
    #[arg(long, required = true, value_name = "PATH")]
    pub origin: PathBuf,

    /// Directory holding the dump files to reduce.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Directory the reduced files are written to. Created if missing.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// File name prefix of the reduced files (`<prefix>-<timestep>.in`).
    #[arg(long, value_name = "NAME")]
    pub prefix: Option<String>,

    // --- Selection ---
    /// Select every bead of a chain. Can be used multiple times.
    #[arg(long = "chain", value_name = "ID")]
    pub chains: Vec<u64>,

    /// Select every bead of a type. Can be used multiple times.
    #[arg(long = "type", value_name = "ID")]
    pub types: Vec<u32>,

    /// Select every bead inside a cell. Can be used multiple times.
    #[arg(long = "cell", value_name = "XLO:XHI,YLO:YHI,ZLO:ZHI", value_parser = parse_cell, allow_hyphen_values = true)]
    pub cells: Vec<Cell>,

    // --- Parsing Overrides ---
    /// Treat coordinates as fractions of the box lengths.
    #[arg(long)]
    pub scaled: bool,

    /// Reject malformed rows, duplicate beads and atom-count mismatches.
    #[arg(long)]
    pub strict: bool,

    /// Skip files that fail to reduce instead of aborting the batch.
    #[arg(long)]
    pub skip_errors: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S engine.tokenizer=whitespace
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `bounds` subcommand.
#[derive(Args, Debug, Clone)]
pub struct BoundsArgs {
    /// Path to the origin file mapping every bead to its chain.
    #[arg(long, required = true, value_name = "PATH")]
    pub origin: PathBuf,

    /// The dump file to analyze.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Treat coordinates as fractions of the box lengths.
    #[arg(long)]
    pub scaled: bool,
}
