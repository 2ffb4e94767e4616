//! Tokenizer implementations producing token lattices from text.
//!
//! # Available Tokenizers
//!
//! - [`graph::GraphTokenizer`] - Reads a compact lattice notation
//!   (`"a b/c d:2 _"`) into graph tokens
//!
//! # Examples
//!
//! ```
//! use tokenlattice::analysis::tokenizer::Tokenizer;
//! use tokenlattice::analysis::tokenizer::graph::GraphTokenizer;
//!
//! let tokenizer = GraphTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("a b/c").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[2].position_increment, 0);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod graph;

pub use graph::GraphTokenizer;
