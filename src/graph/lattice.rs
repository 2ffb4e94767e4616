//! Lattice structure derived on demand from the token cache.
//!
//! The lattice is never materialized as a graph. Cached tokens have
//! non-decreasing start nodes, so the edges leaving a node form one contiguous
//! run of cache indices that can be located by binary search. A node's edge
//! set is only known to be complete once a token starting beyond it has been
//! pulled, or the source is exhausted; until then lookups pull more tokens.

use crate::analysis::source::TokenSource;
use crate::error::Result;
use crate::graph::cache::{CachedToken, TokenCache};

/// Per-session lattice state: the token source and everything pulled from it.
#[derive(Debug)]
pub struct LatticeModel<S> {
    source: S,
    cache: TokenCache,
}

impl<S: TokenSource> LatticeModel<S> {
    /// Create a lattice over `source`, retaining at most `max_cached_tokens`.
    pub fn new(source: S, max_cached_tokens: usize) -> Self {
        LatticeModel {
            source,
            cache: TokenCache::new(max_cached_tokens),
        }
    }

    /// Make sure the token at `index` has been pulled.
    ///
    /// Returns `false` if the source ends before reaching it.
    pub fn ensure(&mut self, index: usize) -> Result<bool> {
        while self.cache.len() <= index {
            if self.cache.pull_next(&mut self.source)?.is_none() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Cache index of the `k`-th edge (in arrival order) leaving `node`.
    pub fn edge_at(&mut self, node: usize, k: usize) -> Result<Option<usize>> {
        loop {
            let tokens = self.cache.tokens();
            let first = tokens.partition_point(|t| t.start < node);
            let past = tokens.partition_point(|t| t.start <= node);

            if first + k < past {
                return Ok(Some(first + k));
            }
            if past < tokens.len() || self.cache.is_exhausted() {
                return Ok(None);
            }
            if self.cache.pull_next(&mut self.source)?.is_none() {
                return Ok(None);
            }
        }
    }

    /// Cache indices of every edge leaving `node`, in arrival order.
    pub fn edges_from(&mut self, node: usize) -> Result<Vec<usize>> {
        let mut edges = Vec::new();
        while let Some(index) = self.edge_at(node, edges.len())? {
            edges.push(index);
        }
        Ok(edges)
    }

    /// Whether at least one edge leaves `node`.
    pub fn has_outgoing(&mut self, node: usize) -> Result<bool> {
        Ok(self.edge_at(node, 0)?.is_some())
    }

    /// Node the edge at `index` leads to.
    pub fn end_node(&self, index: usize) -> usize {
        self.cache.at(index).end()
    }

    /// Cached token at `index`.
    pub fn token(&self, index: usize) -> &CachedToken {
        self.cache.at(index)
    }

    /// Rightmost lattice node known so far.
    pub fn right_edge(&self) -> usize {
        self.cache.right_edge()
    }

    /// Tokens pulled so far.
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Stop counting tokens before `index` against the cache limit.
    pub fn release_before(&mut self, index: usize) {
        self.cache.release_before(index);
    }

    /// The underlying token source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drop all cached state and rewind the source.
    pub fn reset(&mut self) -> Result<()> {
        self.cache.reset();
        self.source.reset()
    }

    /// Drop all cached state and swap in a different source.
    ///
    /// The new source is used as is; call `reset()` to rewind it.
    pub fn replace_source(&mut self, source: S) {
        self.source = source;
        self.cache.reset();
    }
}
