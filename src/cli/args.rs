//! Command line argument parsing for the tokenlattice CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// tokenlattice - enumerate the paths of a token lattice
#[derive(Parser, Debug, Clone)]
#[command(name = "tokenlattice")]
#[command(about = "Enumerate every path through a token lattice")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LatticeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LatticeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Enumerate every path of every base token
    Paths(PathsArgs),

    /// List the tokens of a lattice with their nodes
    Inspect(InspectArgs),
}

/// Where the lattice comes from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Lattice notation, e.g. "a b/c d e/f:3 _"
    #[arg(value_name = "LATTICE", required_unless_present = "input_file")]
    pub lattice: Option<String>,

    /// JSON token file instead of lattice notation
    #[arg(short, long, value_name = "TOKEN_FILE", conflicts_with = "lattice")]
    pub input_file: Option<PathBuf>,
}

/// Arguments for path enumeration
#[derive(Parser, Debug, Clone)]
pub struct PathsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Walker configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of tokens retained ahead of the base token
    #[arg(long)]
    pub max_cached_tokens: Option<usize>,

    /// Maximum number of paths per base token
    #[arg(long)]
    pub max_graph_paths: Option<usize>,

    /// Only report the base token with this index
    #[arg(short, long)]
    pub base: Option<usize>,
}

/// Arguments for lattice inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
