//! Token types for lattice traversal.
//!
//! A [`Token`] is the unit a token source produces. The lattice engine never
//! looks at the text; it only reads `position_increment` and
//! `position_length` to place the token as an edge in the lattice.
//!
//! # Token Graphs
//!
//! ```text
//! Input: "machine learning"
//! With synonym: "ml"
//!
//! Token Graph:
//!   "machine" (pos_inc=1, pos_len=1)   node 0 -> 1
//!   "ml"      (pos_inc=0, pos_len=2)   node 0 -> 2  (alternate of "machine")
//!   "learning"(pos_inc=1, pos_len=1)   node 1 -> 2
//! ```
//!
//! # Examples
//!
//! ```
//! use tokenlattice::analysis::token::Token;
//!
//! let token = Token::new("ml")
//!     .with_position_increment(0)
//!     .with_position_length(2);
//! assert_eq!(token.text, "ml");
//! assert!(token.is_alternate());
//! assert!(token.validate().is_ok());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LatticeError, Result};

/// A token represents a single edge candidate pulled from a token source.
///
/// # Fields
///
/// - `text` - The token's text content, opaque to the lattice engine
/// - `start_offset` / `end_offset` - Byte offsets in original text
/// - `position_increment` - Position relative to previous token (default: 1)
/// - `position_length` - Number of positions this token spans (default: 1)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Position increment from the previous token (default: 1).
    ///
    /// - 1 (default): next position
    /// - 0: same position as the previous token (an alternate, e.g. a synonym)
    /// - >1: skip positions (e.g. for removed stop words)
    pub position_increment: usize,

    /// How many positions this token spans (default: 1).
    ///
    /// A multi-word synonym such as "ml" for "machine learning" spans 2.
    pub position_length: usize,
}

impl Token {
    /// Create a new token with the given text and default position metadata.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token {
            text: text.into(),
            start_offset: 0,
            end_offset: 0,
            position_increment: 1,
            position_length: 1,
        }
    }

    /// Create a new token with text and character offsets.
    pub fn with_offsets<S: Into<String>>(text: S, start_offset: usize, end_offset: usize) -> Self {
        Token {
            text: text.into(),
            start_offset,
            end_offset,
            position_increment: 1,
            position_length: 1,
        }
    }

    /// Set the position increment.
    pub fn with_position_increment(mut self, increment: usize) -> Self {
        self.position_increment = increment;
        self
    }

    /// Set the position length.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }

    /// Whether this token shares its start position with the previous token.
    pub fn is_alternate(&self) -> bool {
        self.position_increment == 0
    }

    /// Check the position metadata of this token.
    pub fn validate(&self) -> Result<()> {
        if self.position_length == 0 {
            return Err(LatticeError::invalid_token(format!(
                "token '{}' has position length 0 (must be at least 1)",
                self.text
            )));
        }
        if self.end_offset < self.start_offset {
            return Err(LatticeError::invalid_token(format!(
                "token '{}' ends at offset {} before it starts at {}",
                self.text, self.end_offset, self.start_offset
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from a tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
