//! Pull-based token sources feeding the lattice engine.
//!
//! The lattice engine only ever moves forward through its input, one token at
//! a time, and needs to know how the stream ended. [`TokenSource`] captures
//! that contract; [`CannedTokenSource`] is a resettable implementation over a
//! fixed token list.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::token::{Token, TokenStream};
use crate::error::{LatticeError, Result};

/// End-of-stream state reported by a token source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEnd {
    /// Positions consumed after the last token (e.g. a removed trailing stop word).
    pub final_position_increment: usize,

    /// Offset of the end of the input.
    pub final_offset: usize,
}

/// Trait for forward-only producers of tokens.
///
/// # Examples
///
/// ```
/// use tokenlattice::analysis::source::{CannedTokenSource, TokenSource};
/// use tokenlattice::analysis::token::Token;
///
/// let mut source = CannedTokenSource::new(vec![Token::new("a"), Token::new("b")]);
/// assert_eq!(source.next_token().unwrap().unwrap().text, "a");
/// assert_eq!(source.next_token().unwrap().unwrap().text, "b");
/// assert!(source.next_token().unwrap().is_none());
/// ```
pub trait TokenSource {
    /// Pull the next token, or `None` once the source is exhausted.
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// End-of-stream state; only meaningful after `next_token` returned `None`.
    fn end(&mut self) -> SourceEnd;

    /// Rewind the source so it produces the same tokens again.
    fn reset(&mut self) -> Result<()>;

    /// Get the name of this source (for debugging and logging).
    fn name(&self) -> &'static str {
        "token_source"
    }
}

impl<S: TokenSource + ?Sized> TokenSource for Box<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        (**self).next_token()
    }

    fn end(&mut self) -> SourceEnd {
        (**self).end()
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A source that replays a fixed list of tokens.
#[derive(Clone, Debug, Default)]
pub struct CannedTokenSource {
    tokens: Vec<Token>,
    next: usize,
    end: SourceEnd,
}

impl CannedTokenSource {
    /// Create a new source over the given tokens.
    ///
    /// The final offset defaults to the largest end offset among the tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        let final_offset = tokens.iter().map(|t| t.end_offset).max().unwrap_or(0);
        CannedTokenSource {
            tokens,
            next: 0,
            end: SourceEnd {
                final_position_increment: 0,
                final_offset,
            },
        }
    }

    /// Create a new source by draining a token stream.
    pub fn from_stream(stream: TokenStream) -> Self {
        Self::new(stream.collect())
    }

    /// Set the end-of-stream state.
    pub fn with_end(mut self, end: SourceEnd) -> Self {
        self.end = end;
        self
    }

    /// Set the positions consumed after the last token.
    pub fn with_final_position_increment(mut self, increment: usize) -> Self {
        self.end.final_position_increment = increment;
        self
    }

    /// Parse a source from its JSON description.
    ///
    /// Accepts either a bare array of tokens or an object with a `tokens`
    /// array and optional `final_position_increment` / `final_offset`.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: JsonSource = serde_json::from_str(json)?;
        let (raw_tokens, final_increment, final_offset) = match document {
            JsonSource::Tokens(tokens) => (tokens, 0, None),
            JsonSource::Document {
                tokens,
                final_position_increment,
                final_offset,
            } => (tokens, final_position_increment, final_offset),
        };

        let tokens = raw_tokens
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_token(index))
            .collect::<Result<Vec<_>>>()?;
        let final_increment = usize::try_from(final_increment).map_err(|_| {
            LatticeError::invalid_token(format!(
                "final position increment {final_increment} is negative"
            ))
        })?;

        let mut source = Self::new(tokens).with_final_position_increment(final_increment);
        if let Some(offset) = final_offset {
            source.end.final_offset = offset;
        }
        Ok(source)
    }

    /// Load a source from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// All tokens this source replays.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens not yet pulled.
    pub fn remaining(&self) -> usize {
        self.tokens.len() - self.next
    }
}

impl TokenSource for CannedTokenSource {
    fn next_token(&mut self) -> Result<Option<Token>> {
        let token = self.tokens.get(self.next).cloned();
        if token.is_some() {
            self.next += 1;
        }
        Ok(token)
    }

    fn end(&mut self) -> SourceEnd {
        self.end
    }

    fn reset(&mut self) -> Result<()> {
        self.next = 0;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSource {
    Tokens(Vec<RawToken>),
    Document {
        tokens: Vec<RawToken>,
        #[serde(default)]
        final_position_increment: i64,
        #[serde(default)]
        final_offset: Option<usize>,
    },
}

/// Token as written in JSON input; signed so negative values can be reported.
#[derive(Deserialize)]
struct RawToken {
    text: String,
    #[serde(default)]
    start_offset: usize,
    #[serde(default)]
    end_offset: usize,
    #[serde(default = "default_one")]
    position_increment: i64,
    #[serde(default = "default_one")]
    position_length: i64,
}

fn default_one() -> i64 {
    1
}

impl RawToken {
    fn into_token(self, index: usize) -> Result<Token> {
        let position_increment = usize::try_from(self.position_increment).map_err(|_| {
            LatticeError::invalid_token(format!(
                "token #{index} '{}' has negative position increment {}",
                self.text, self.position_increment
            ))
        })?;
        let position_length = usize::try_from(self.position_length)
            .ok()
            .filter(|length| *length > 0)
            .ok_or_else(|| {
                LatticeError::invalid_token(format!(
                    "token #{index} '{}' has position length {} (must be at least 1)",
                    self.text, self.position_length
                ))
            })?;

        Ok(Token::with_offsets(self.text, self.start_offset, self.end_offset)
            .with_position_increment(position_increment)
            .with_position_length(position_length))
    }
}
