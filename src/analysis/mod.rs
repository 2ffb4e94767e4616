//! Token model and token sources.
//!
//! This module holds everything upstream of the lattice engine: the [`Token`]
//! data model, the pull-based [`TokenSource`] contract and the sources and
//! tokenizers used to drive the engine.

pub mod source;
pub mod token;
pub mod tokenizer;

// Re-export commonly used types
pub use source::*;
pub use token::*;
pub use tokenizer::*;
