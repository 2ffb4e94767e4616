//! Graph tokenizer for a compact lattice notation.
//!
//! The notation describes one lattice position per whitespace-separated entry:
//!
//! ```text
//! a b/c d e/f:3 _
//! ```
//!
//! - `/` separates alternates starting at the same position (`b` and `c`)
//! - `:N` sets the position length of an entry (`f` spans 3 positions)
//! - `_` is a hole: a skipped position, as left behind by a removed stop word.
//!   Holes after the last entry become the source's final position increment.

use lazy_static::lazy_static;
use regex::Regex;

use super::Tokenizer;

use crate::analysis::source::{CannedTokenSource, SourceEnd};
use crate::analysis::token::{Token, TokenStream};
use crate::error::{LatticeError, Result};

lazy_static! {
    static ref ENTRY: Regex = Regex::new(r"\S+").unwrap();
    static ref ALTERNATE: Regex = Regex::new(r"^([^:]+)(?::(\d+))?$").unwrap();
}

const HOLE: &str = "_";

/// Tokens and end state produced from one piece of lattice notation.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphTokens {
    pub tokens: Vec<Token>,
    pub end: SourceEnd,
}

/// A tokenizer that reads lattice notation into graph tokens.
#[derive(Clone, Debug, Default)]
pub struct GraphTokenizer;

impl GraphTokenizer {
    /// Create a new graph tokenizer.
    pub fn new() -> Self {
        GraphTokenizer
    }

    /// Parse notation into tokens plus the end-of-stream state.
    pub fn parse(&self, text: &str) -> Result<GraphTokens> {
        let mut tokens = Vec::new();
        let mut holes = 0;

        for entry in ENTRY.find_iter(text) {
            if entry.as_str() == HOLE {
                holes += 1;
                continue;
            }

            let mut offset = entry.start();
            for (index, alternate) in entry.as_str().split('/').enumerate() {
                let increment = if index == 0 { holes + 1 } else { 0 };
                tokens.push(Self::parse_alternate(alternate, offset, increment)?);
                offset += alternate.len() + 1;
            }
            holes = 0;
        }

        Ok(GraphTokens {
            tokens,
            end: SourceEnd {
                final_position_increment: holes,
                final_offset: text.len(),
            },
        })
    }

    /// Parse notation straight into a resettable token source.
    pub fn source(&self, text: &str) -> Result<CannedTokenSource> {
        let GraphTokens { tokens, end } = self.parse(text)?;
        Ok(CannedTokenSource::new(tokens).with_end(end))
    }

    fn parse_alternate(alternate: &str, offset: usize, increment: usize) -> Result<Token> {
        let captures = ALTERNATE.captures(alternate).ok_or_else(|| {
            LatticeError::parse(format!(
                "malformed lattice entry '{alternate}' at offset {offset}"
            ))
        })?;

        let term = &captures[1];
        let length = match captures.get(2) {
            Some(digits) => digits.as_str().parse::<usize>().map_err(|e| {
                LatticeError::parse(format!("invalid position length in '{alternate}': {e}"))
            })?,
            None => 1,
        };

        Ok(Token::with_offsets(term, offset, offset + term.len())
            .with_position_increment(increment)
            .with_position_length(length))
    }
}

impl Tokenizer for GraphTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens = self.parse(text)?.tokens;
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "graph"
    }
}
