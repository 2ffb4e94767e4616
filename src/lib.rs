//! # tokenlattice
//!
//! Enumerates every linear path through a token lattice: a token stream in
//! which synonyms and multi-word alternatives overlap instead of forming a
//! single sequence.
//!
//! ## Features
//!
//! - Lazy, single-pass consumption of forward-only token sources
//! - Depth-first path enumeration without recursion
//! - Bounded lookahead and bounded path counts
//! - Trailing position reporting for paths that end short of the lattice

pub mod analysis;
pub mod cli;
pub mod error;
pub mod graph;

pub mod prelude {
    pub use crate::analysis::source::{CannedTokenSource, SourceEnd, TokenSource};
    pub use crate::analysis::token::Token;
    pub use crate::analysis::tokenizer::{GraphTokenizer, Tokenizer};
    pub use crate::error::{LatticeError, Result};
    pub use crate::graph::{BasePaths, GraphWalker, LatticePath, WalkerConfig};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
