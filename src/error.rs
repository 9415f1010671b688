//! Error types for the cache
//!
//! Lookups and writes never fail; only building a cache can.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while constructing a [`Cache`](crate::Cache).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No tokio runtime to host the sweeper task
    #[error("Cache requires a running tokio runtime to spawn its sweeper")]
    NoRuntime,
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
