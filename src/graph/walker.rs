//! Graph walker: the public entry point for traversing a token lattice.
//!
//! A walker pulls tokens lazily from its source and exposes every path
//! through the lattice, one base token at a time:
//!
//! ```text
//! while walker.advance_base()? {
//!     loop {
//!         while walker.advance_path()? { /* current_token() is the next edge */ }
//!         if !walker.increment_graph()? { break; }
//!     }
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use tokenlattice::analysis::tokenizer::graph::GraphTokenizer;
//! use tokenlattice::graph::walker::GraphWalker;
//!
//! let source = GraphTokenizer::new().source("a b/c d").unwrap();
//! let mut walker = GraphWalker::new(source);
//!
//! assert!(walker.advance_base().unwrap());
//! let paths: Vec<String> = walker
//!     .collect_paths()
//!     .unwrap()
//!     .iter()
//!     .map(|path| path.to_string())
//!     .collect();
//! assert_eq!(paths, vec!["a b d", "a c d"]);
//! ```

use std::fmt;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::source::TokenSource;
use crate::analysis::token::Token;
use crate::error::{LatticeError, Result};
use crate::graph::config::WalkerConfig;
use crate::graph::lattice::LatticeModel;
use crate::graph::path::{PathEnumerator, PathStep};

/// Where the walker stands within its session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Walking (or not yet started).
    Active,
    /// No base token is left.
    Exhausted,
    /// A fatal error ended the session; only `reset()` is accepted.
    Failed,
}

/// One complete path through the lattice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticePath {
    pub tokens: Vec<Token>,
    /// Lattice positions left uncovered after the path's last token.
    pub trailing_positions: usize,
}

impl fmt::Display for LatticePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let texts: Vec<&str> = self.tokens.iter().map(|t| t.text.as_str()).collect();
        write!(f, "{}", texts.join(" "))
    }
}

/// All paths leaving one base token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePaths {
    pub base: Token,
    /// Node the base token starts at.
    pub node: usize,
    pub paths: Vec<LatticePath>,
}

/// Enumerates the paths of a token lattice read from a forward-only source.
#[derive(Debug)]
pub struct GraphWalker<S: TokenSource> {
    lattice: LatticeModel<S>,
    paths: PathEnumerator,
    config: WalkerConfig,
    base: Option<usize>,
    trailing_positions: usize,
    state: SessionState,
}

impl<S: TokenSource> GraphWalker<S> {
    /// Create a walker with the default limits.
    pub fn new(source: S) -> Self {
        Self::build(source, WalkerConfig::default())
    }

    /// Create a walker with custom limits.
    pub fn with_config(source: S, config: WalkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(source, config))
    }

    fn build(source: S, config: WalkerConfig) -> Self {
        GraphWalker {
            lattice: LatticeModel::new(source, config.max_cached_tokens),
            paths: PathEnumerator::new(config.max_graph_paths),
            config,
            base: None,
            trailing_positions: 0,
            state: SessionState::Active,
        }
    }

    /// Move the base to the next token of the stream.
    ///
    /// Every token becomes a base in arrival order, alternates included.
    /// Clears the path history of the previous base. Returns `false` once the
    /// source is exhausted.
    pub fn advance_base(&mut self) -> Result<bool> {
        self.check_active()?;
        if self.state == SessionState::Exhausted {
            return Ok(false);
        }

        let next = self.base.map_or(0, |base| base + 1);
        let found = self.guard(|walker| walker.lattice.ensure(next))?;
        if !found {
            debug!("no base token left after {} tokens", self.lattice.cache().len());
            self.base = None;
            self.paths.clear();
            self.state = SessionState::Exhausted;
            return Ok(false);
        }

        self.lattice.release_before(next);
        self.base = Some(next);
        let node = self.lattice.token(next).start;
        self.paths.start(PathStep {
            node,
            choice: 0,
            token: next,
        });
        debug!(
            "base token #{} '{}' at node {}",
            next,
            self.lattice.token(next).token.text,
            node
        );
        Ok(true)
    }

    /// Move one edge forward along the current path.
    ///
    /// Returns `false` at the end of the path, after recording the trailing
    /// positions left between the path's end and the lattice's right edge.
    pub fn advance_path(&mut self) -> Result<bool> {
        self.check_active()?;
        if self.base.is_none() {
            return Ok(false);
        }

        match self.guard(|walker| walker.paths.advance(&mut walker.lattice))? {
            Some(step) => {
                trace!(
                    "path step to '{}' at node {}",
                    self.lattice.token(step.token).token.text,
                    step.node
                );
                Ok(true)
            }
            None => {
                if let Some(tail) = self.paths.steps().last() {
                    let end = self.lattice.end_node(tail.token);
                    self.trailing_positions = self.lattice.right_edge().saturating_sub(end);
                }
                Ok(false)
            }
        }
    }

    /// Switch to the next path leaving the current base.
    ///
    /// On success the current token is the base again and `advance_path()`
    /// replays the new path from its start.
    pub fn increment_graph(&mut self) -> Result<bool> {
        self.check_active()?;
        if self.base.is_none() {
            return Ok(false);
        }
        self.guard(|walker| walker.paths.next_path(&mut walker.lattice))
    }

    /// Drain every path leaving the current base.
    ///
    /// Starts over from the base's current path; paths already passed by an
    /// earlier `increment_graph()` are not revisited.
    pub fn collect_paths(&mut self) -> Result<Vec<LatticePath>> {
        let mut paths = Vec::new();
        if self.base.is_none() {
            return Ok(paths);
        }

        loop {
            while self.advance_path()? {}
            paths.push(LatticePath {
                tokens: self.current_path().into_iter().cloned().collect(),
                trailing_positions: self.trailing_positions,
            });
            if !self.increment_graph()? {
                return Ok(paths);
            }
        }
    }

    /// Walk every remaining base and collect all of its paths.
    pub fn enumerate(&mut self) -> Result<Vec<BasePaths>> {
        let mut bases = Vec::new();
        while self.advance_base()? {
            let Some(index) = self.base else { break };
            let paths = self.collect_paths()?;
            let cached = self.lattice.token(index);
            bases.push(BasePaths {
                base: cached.token.clone(),
                node: cached.start,
                paths,
            });
        }
        Ok(bases)
    }

    /// Token under the path cursor (the base right after a base or path switch).
    pub fn current_token(&self) -> Option<&Token> {
        self.base?;
        self.paths
            .current()
            .map(|step| &self.lattice.token(step.token).token)
    }

    /// The current base token.
    pub fn base_token(&self) -> Option<&Token> {
        self.base.map(|index| &self.lattice.token(index).token)
    }

    /// Tokens of the current path explored so far, base first.
    pub fn current_path(&self) -> Vec<&Token> {
        if self.base.is_none() {
            return Vec::new();
        }
        self.paths
            .steps()
            .iter()
            .map(|step| &self.lattice.token(step.token).token)
            .collect()
    }

    /// Number of tokens pulled from the source in this session.
    pub fn cached_token_count(&self) -> usize {
        self.lattice.cache().len()
    }

    /// Trailing positions recorded at the end of the last completed path.
    pub fn trailing_positions(&self) -> usize {
        self.trailing_positions
    }

    /// Final offset reported by the source, once it is exhausted.
    pub fn final_offset(&self) -> Option<usize> {
        self.lattice.cache().source_end().map(|end| end.final_offset)
    }

    /// Number of paths materialized for the current base.
    pub fn path_count(&self) -> usize {
        self.paths.path_count()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        self.lattice.source()
    }

    /// End the session and rewind the source for a fresh pass.
    ///
    /// If the source cannot be rewound the walker is left `Failed` with
    /// nothing cached.
    pub fn reset(&mut self) -> Result<()> {
        self.paths.clear();
        self.base = None;
        self.trailing_positions = 0;

        if let Err(e) = self.lattice.reset() {
            warn!("{} source could not be reset: {e}", self.lattice.source().name());
            self.state = SessionState::Failed;
            return Err(e);
        }
        self.state = SessionState::Active;
        debug!("walker reset");
        Ok(())
    }

    /// End the session and continue with a different source.
    pub fn reset_with_source(&mut self, source: S) -> Result<()> {
        self.lattice.replace_source(source);
        self.reset()
    }

    fn check_active(&self) -> Result<()> {
        if self.state == SessionState::Failed {
            return Err(LatticeError::invalid_operation(
                "session ended by an earlier error; call reset() first",
            ));
        }
        Ok(())
    }

    /// Run `op`, ending the session if it fails fatally.
    fn guard<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = op(self);
        if let Err(e) = &result
            && e.is_fatal()
        {
            warn!("graph walk aborted: {e}");
            self.state = SessionState::Failed;
        }
        result
    }
}
