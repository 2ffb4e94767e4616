//! Command implementations for the tokenlattice CLI.

use anyhow::Context;
use log::info;

use crate::analysis::source::{CannedTokenSource, TokenSource};
use crate::analysis::tokenizer::graph::GraphTokenizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{LatticeError, Result};
use crate::graph::cache::TokenCache;
use crate::graph::config::WalkerConfig;
use crate::graph::walker::GraphWalker;

/// Execute a CLI command.
pub fn execute_command(args: LatticeArgs) -> Result<()> {
    match &args.command {
        Command::Paths(paths_args) => {
            let report = enumerate_paths(paths_args)?;
            output_result(&report, &args)
        }
        Command::Inspect(inspect_args) => {
            let report = inspect_lattice(inspect_args)?;
            output_result(&report, &args)
        }
    }
}

/// Enumerate the paths of every base token.
pub fn enumerate_paths(args: &PathsArgs) -> Result<PathsReport> {
    let config = load_config(args)?;
    let source = load_source(&args.input)?;
    let mut walker = GraphWalker::with_config(source, config)?;

    let mut bases = walker.enumerate()?;
    if let Some(index) = args.base {
        if index >= bases.len() {
            return Err(LatticeError::invalid_operation(format!(
                "base {index} does not exist ({} base tokens)",
                bases.len()
            )));
        }
        bases = vec![bases.swap_remove(index)];
    }

    let total_paths = bases.iter().map(|b| b.paths.len()).sum();
    info!(
        "enumerated {} paths from {} bases",
        total_paths,
        bases.len()
    );
    Ok(PathsReport {
        bases,
        total_paths,
        cached_tokens: walker.cached_token_count(),
    })
}

/// List every token of the lattice with its start and end node.
pub fn inspect_lattice(args: &InspectArgs) -> Result<InspectReport> {
    let mut source = load_source(&args.input)?;
    let mut cache = TokenCache::new(usize::MAX);
    while cache.pull_next(&mut source)?.is_some() {}

    let tokens = cache
        .tokens()
        .iter()
        .enumerate()
        .map(|(index, cached)| TokenRow {
            index,
            text: cached.token.text.clone(),
            start: cached.start,
            end: cached.end(),
            position_increment: cached.token.position_increment,
            position_length: cached.token.position_length,
            start_offset: cached.token.start_offset,
            end_offset: cached.token.end_offset,
        })
        .collect();

    Ok(InspectReport {
        tokens,
        right_edge: cache.right_edge(),
        final_offset: cache.source_end().map(|end| end.final_offset),
    })
}

/// Build the walker configuration: file first, then command line overrides.
fn load_config(args: &PathsArgs) -> Result<WalkerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("loading walker configuration from {}", path.display());
            WalkerConfig::from_json_file(path)
                .with_context(|| format!("loading walker configuration {}", path.display()))?
        }
        None => WalkerConfig::default(),
    };
    if let Some(limit) = args.max_cached_tokens {
        config.max_cached_tokens = limit;
    }
    if let Some(limit) = args.max_graph_paths {
        config.max_graph_paths = limit;
    }
    config.validate()?;
    Ok(config)
}

fn load_source(input: &InputArgs) -> Result<CannedTokenSource> {
    let source = match (&input.lattice, &input.input_file) {
        (_, Some(path)) => CannedTokenSource::from_json_file(path)
            .with_context(|| format!("loading token file {}", path.display()))?,
        (Some(notation), None) => GraphTokenizer::new().source(notation)?,
        (None, None) => {
            return Err(LatticeError::invalid_operation(
                "either LATTICE or --input-file is required",
            ));
        }
    };
    info!(
        "loaded {} tokens from {} input",
        source.tokens().len(),
        source.name()
    );
    Ok(source)
}
