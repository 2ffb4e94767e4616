//! Configuration for graph walking.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};

/// Default number of tokens a walker may retain ahead of its base token.
pub const DEFAULT_MAX_CACHED_TOKENS: usize = 100;

/// Default number of paths a walker may materialize for one base token.
pub const DEFAULT_MAX_GRAPH_PATHS: usize = 1000;

/// Limits applied while walking a token lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Maximum number of tokens retained in the cache (from the base onward).
    pub max_cached_tokens: usize,
    /// Maximum number of distinct paths materialized per base token.
    pub max_graph_paths: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_cached_tokens: DEFAULT_MAX_CACHED_TOKENS,
            max_graph_paths: DEFAULT_MAX_GRAPH_PATHS,
        }
    }
}

impl WalkerConfig {
    /// Set the cache limit.
    pub fn with_max_cached_tokens(mut self, limit: usize) -> Self {
        self.max_cached_tokens = limit;
        self
    }

    /// Set the path limit.
    pub fn with_max_graph_paths(mut self, limit: usize) -> Self {
        self.max_graph_paths = limit;
        self
    }

    /// Check that both limits allow any traversal at all.
    pub fn validate(&self) -> Result<()> {
        if self.max_cached_tokens == 0 {
            return Err(LatticeError::invalid_config(
                "max_cached_tokens must be greater than 0",
            ));
        }
        if self.max_graph_paths == 0 {
            return Err(LatticeError::invalid_config(
                "max_graph_paths must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: WalkerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
