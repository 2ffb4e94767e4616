//! Depth-first enumeration of the paths leaving a base token.
//!
//! The current path is an explicit list of steps. Each step remembers which of
//! its node's edges it took (`choice`), which is all the history needed: the
//! next path replaces the deepest step that still has an untried alternate
//! and drops everything after it. The dropped suffix is rebuilt lazily by
//! primary descent (always the first edge) as the caller advances, so only
//! the part of the lattice a caller actually walks is ever pulled.
//!
//! ```text
//! a b/c d      base a:  a -> b -> d
//!                       a -> c -> d   (b replaced by its alternate)
//! ```

use log::{debug, warn};

use crate::analysis::source::TokenSource;
use crate::error::{LatticeError, Result};
use crate::graph::lattice::LatticeModel;

/// One edge of the current path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep {
    /// Node the edge leaves from.
    pub node: usize,
    /// Index of the edge among the edges leaving `node`.
    pub choice: usize,
    /// Cache index of the edge's token.
    pub token: usize,
}

/// Explores the paths leaving one base token at a time.
#[derive(Debug)]
pub struct PathEnumerator {
    steps: Vec<PathStep>,
    cursor: usize,
    paths: usize,
    max_paths: usize,
}

impl PathEnumerator {
    /// Create an enumerator materializing at most `max_paths` paths per base.
    pub fn new(max_paths: usize) -> Self {
        PathEnumerator {
            steps: Vec::new(),
            cursor: 0,
            paths: 0,
            max_paths,
        }
    }

    /// Start enumerating from a new base step, forgetting all history.
    pub fn start(&mut self, base: PathStep) {
        self.steps.clear();
        self.steps.push(base);
        self.cursor = 0;
        self.paths = 1;
    }

    /// Move the cursor one edge forward along the current path.
    ///
    /// Replays already explored steps first, then extends the path with the
    /// first edge leaving its tail. Returns `None` at the end of the path.
    pub fn advance<S: TokenSource>(
        &mut self,
        lattice: &mut LatticeModel<S>,
    ) -> Result<Option<PathStep>> {
        let Some(tail) = self.steps.last().copied() else {
            return Ok(None);
        };

        if self.cursor + 1 < self.steps.len() {
            self.cursor += 1;
            return Ok(Some(self.steps[self.cursor]));
        }

        let node = lattice.end_node(tail.token);
        match lattice.edge_at(node, 0)? {
            Some(token) => {
                let step = PathStep {
                    node,
                    choice: 0,
                    token,
                };
                self.steps.push(step);
                self.cursor += 1;
                Ok(Some(step))
            }
            None => Ok(None),
        }
    }

    /// Switch to the next unexplored path and rewind the cursor to the base.
    ///
    /// Returns `false` once every branch along the explored path has been
    /// tried.
    pub fn next_path<S: TokenSource>(&mut self, lattice: &mut LatticeModel<S>) -> Result<bool> {
        for depth in (1..self.steps.len()).rev() {
            let step = self.steps[depth];
            let Some(token) = lattice.edge_at(step.node, step.choice + 1)? else {
                continue;
            };

            if self.paths >= self.max_paths {
                warn!(
                    "path limit reached at node {} after {} paths",
                    step.node, self.paths
                );
                return Err(LatticeError::path_overflow(self.max_paths));
            }

            self.steps.truncate(depth);
            self.steps.push(PathStep {
                node: step.node,
                choice: step.choice + 1,
                token,
            });
            self.cursor = 0;
            self.paths += 1;
            debug!(
                "path #{} branches at node {} (alternate {})",
                self.paths,
                step.node,
                step.choice + 1
            );
            return Ok(true);
        }

        self.cursor = 0;
        Ok(false)
    }

    /// Step under the cursor.
    pub fn current(&self) -> Option<PathStep> {
        self.steps.get(self.cursor).copied()
    }

    /// Steps explored so far along the current path.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of paths materialized for the current base.
    pub fn path_count(&self) -> usize {
        self.paths
    }

    /// Forget the base and all history.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.cursor = 0;
        self.paths = 0;
    }
}
