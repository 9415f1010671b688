//! TTL Cache - an in-process key-value cache with expiring entries
//!
//! Every entry carries its own deadline. Reads hide expired entries at once,
//! and a background sweeper bound to a cancellation token reclaims them
//! periodically.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{Cache, CacheStats, Entry, Store};
pub use config::{CacheConfig, DEFAULT_CLEANUP_INTERVAL};
pub use error::{CacheError, Result};
pub use tasks::{sweep_expired, SweepReport};
pub use tokio_util::sync::CancellationToken;
