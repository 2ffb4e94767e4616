//! Append-only cache of tokens pulled from a token source.
//!
//! Every token is assigned its start node when it is pulled, so the rest of
//! the engine can address tokens by index and read their span without
//! replaying increments.

use log::{trace, warn};

use crate::analysis::source::{SourceEnd, TokenSource};
use crate::analysis::token::Token;
use crate::error::{LatticeError, Result};

/// A cached token together with the lattice node it starts at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedToken {
    pub token: Token,
    pub start: usize,
}

impl CachedToken {
    /// Node this token's edge leads to.
    pub fn end(&self) -> usize {
        self.start + self.token.position_length
    }
}

/// Buffer of every token pulled during one session.
///
/// Tokens before the `floor` index stay addressable but no longer count
/// toward `max_size`; the walker raises the floor as its base token advances.
#[derive(Debug)]
pub struct TokenCache {
    tokens: Vec<CachedToken>,
    max_size: usize,
    floor: usize,
    max_end: usize,
    end: Option<SourceEnd>,
}

impl TokenCache {
    /// Create an empty cache retaining at most `max_size` tokens.
    pub fn new(max_size: usize) -> Self {
        TokenCache {
            tokens: Vec::new(),
            max_size,
            floor: 0,
            max_end: 0,
            end: None,
        }
    }

    /// Pull the next token from `source` and append it.
    ///
    /// Returns `None` once the source is exhausted; the source's end state is
    /// recorded the first time that happens.
    pub fn pull_next<S: TokenSource>(&mut self, source: &mut S) -> Result<Option<&CachedToken>> {
        if self.end.is_some() {
            return Ok(None);
        }

        let Some(token) = source.next_token()? else {
            let end = source.end();
            trace!(
                "{} source exhausted after {} tokens ({} trailing positions)",
                source.name(),
                self.tokens.len(),
                end.final_position_increment
            );
            self.end = Some(end);
            return Ok(None);
        };

        if self.retained() >= self.max_size {
            warn!(
                "token cache limit reached while pulling token #{}",
                self.tokens.len()
            );
            return Err(LatticeError::cache_overflow(self.max_size));
        }

        token.validate()?;

        let start = match self.tokens.last() {
            Some(previous) => previous.start.checked_add(token.position_increment),
            None => Some(token.position_increment.saturating_sub(1)),
        };
        let Some(start) = start.filter(|start| start.checked_add(token.position_length).is_some())
        else {
            return Err(LatticeError::invalid_token(format!(
                "token #{} '{}' lies beyond the last addressable node",
                self.tokens.len(),
                token.text
            )));
        };
        debug_assert!(self.tokens.last().is_none_or(|previous| previous.start <= start));

        let cached = CachedToken { token, start };
        self.max_end = self.max_end.max(cached.end());
        trace!(
            "cached token #{} '{}' spanning nodes {}..{}",
            self.tokens.len(),
            cached.token.text,
            cached.start,
            cached.end()
        );
        self.tokens.push(cached);
        Ok(self.tokens.last())
    }

    /// Token at a previously pulled index.
    ///
    /// # Panics
    ///
    /// Panics if `index` has not been pulled yet.
    pub fn at(&self, index: usize) -> &CachedToken {
        &self.tokens[index]
    }

    /// Token at `index`, if it has been pulled.
    pub fn get(&self, index: usize) -> Option<&CachedToken> {
        self.tokens.get(index)
    }

    /// All cached tokens in arrival order.
    pub fn tokens(&self) -> &[CachedToken] {
        &self.tokens
    }

    /// Number of tokens pulled so far in this session.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if no token has been pulled yet.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens counted against the size limit.
    pub fn retained(&self) -> usize {
        self.tokens.len() - self.floor.min(self.tokens.len())
    }

    /// Stop counting tokens before `index` against the size limit.
    pub fn release_before(&mut self, index: usize) {
        self.floor = self.floor.max(index);
    }

    /// The configured size limit.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether the source has been exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.end.is_some()
    }

    /// End state of the source, once exhausted.
    pub fn source_end(&self) -> Option<SourceEnd> {
        self.end
    }

    /// Rightmost lattice node known so far.
    ///
    /// Once the source is exhausted this includes the positions it reported
    /// after its last token.
    pub fn right_edge(&self) -> usize {
        match (self.tokens.last(), self.end) {
            (Some(last), Some(end)) => self
                .max_end
                .max((last.start + 1).saturating_add(end.final_position_increment)),
            (None, Some(end)) => end.final_position_increment,
            _ => self.max_end,
        }
    }

    /// Discard all tokens and position bookkeeping.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.floor = 0;
        self.max_end = 0;
        self.end = None;
    }
}
