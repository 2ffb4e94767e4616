//! Error types for the tokenlattice library.
//!
//! All errors are represented by the [`LatticeError`] enum. The two overflow
//! variants and [`LatticeError::InvalidToken`] are fatal for a traversal
//! session: once a walker returns one of them it refuses further traversal
//! until it is reset.
//!
//! # Examples
//!
//! ```
//! use tokenlattice::error::{LatticeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LatticeError::invalid_token("position length must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for lattice operations.
#[derive(Error, Debug)]
pub enum LatticeError {
    /// I/O errors (reading token files, configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// More tokens were retained in the cache than the configured limit allows.
    #[error("Too many cached tokens (> {limit})")]
    CacheOverflow { limit: usize },

    /// More paths were materialized for a single base token than allowed.
    #[error("Too many graph paths (> {limit})")]
    PathOverflow { limit: usize },

    /// A token with malformed position metadata was ingested.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Malformed lattice syntax handed to a tokenizer
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid operation for the current session state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Error with added context, e.g. which input file failed to load
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LatticeError.
pub type Result<T> = std::result::Result<T, LatticeError>;

impl LatticeError {
    /// Create a new cache overflow error.
    pub fn cache_overflow(limit: usize) -> Self {
        LatticeError::CacheOverflow { limit }
    }

    /// Create a new path overflow error.
    pub fn path_overflow(limit: usize) -> Self {
        LatticeError::PathOverflow { limit }
    }

    /// Create a new invalid token error.
    pub fn invalid_token<S: Into<String>>(msg: S) -> Self {
        LatticeError::InvalidToken(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        LatticeError::Parse(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        LatticeError::InvalidConfig(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        LatticeError::InvalidOperation(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LatticeError::Other(msg.into())
    }

    /// Whether this error terminates a traversal session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LatticeError::CacheOverflow { .. }
                | LatticeError::PathOverflow { .. }
                | LatticeError::InvalidToken(_)
        )
    }
}
