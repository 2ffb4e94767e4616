//! Token lattice traversal.
//!
//! - [`cache::TokenCache`] - append-only buffer of pulled tokens
//! - [`lattice::LatticeModel`] - node/edge view derived from the cache
//! - [`path::PathEnumerator`] - depth-first path exploration per base token
//! - [`walker::GraphWalker`] - the public coordinator

pub mod cache;
pub mod config;
pub mod lattice;
pub mod path;
pub mod walker;

// Re-export commonly used types
pub use cache::{CachedToken, TokenCache};
pub use config::WalkerConfig;
pub use lattice::LatticeModel;
pub use path::{PathEnumerator, PathStep};
pub use walker::{BasePaths, GraphWalker, LatticePath, SessionState};
