//! Output formatting for CLI commands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cli::args::{LatticeArgs, OutputFormat};
use crate::error::Result;
use crate::graph::walker::BasePaths;

/// Result structure for path enumeration.
#[derive(Debug, Serialize, Deserialize)]
pub struct PathsReport {
    pub bases: Vec<BasePaths>,
    pub total_paths: usize,
    pub cached_tokens: usize,
}

/// A token as shown by `inspect`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenRow {
    pub index: usize,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub position_increment: usize,
    pub position_length: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Result structure for lattice inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct InspectReport {
    pub tokens: Vec<TokenRow>,
    pub right_edge: usize,
    pub final_offset: Option<usize>,
}

impl fmt::Display for PathsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.bases {
            writeln!(f, "{} @ node {}:", base.base.text, base.node)?;
            for path in &base.paths {
                if path.trailing_positions > 0 {
                    writeln!(f, "  {} (+{} trailing)", path, path.trailing_positions)?;
                } else {
                    writeln!(f, "  {path}")?;
                }
            }
        }
        write!(
            f,
            "{} paths from {} bases ({} tokens cached)",
            self.total_paths,
            self.bases.len(),
            self.cached_tokens
        )
    }
}

impl fmt::Display for InspectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5}  {:<16} {:>5} {:>5} {:>4} {:>4}",
            "INDEX", "TEXT", "FROM", "TO", "INC", "LEN"
        )?;
        for row in &self.tokens {
            writeln!(
                f,
                "{:>5}  {:<16} {:>5} {:>5} {:>4} {:>4}",
                row.index, row.text, row.start, row.end, row.position_increment, row.position_length
            )?;
        }
        write!(f, "right edge: node {}", self.right_edge)
    }
}

/// Render a result in the requested format.
pub fn render<T: Serialize + fmt::Display>(result: &T, args: &LatticeArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.to_string()),
        OutputFormat::Json if args.pretty => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + fmt::Display>(result: &T, args: &LatticeArgs) -> Result<()> {
    println!("{}", render(result, args)?);
    Ok(())
}
