//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL and lazy expiry.

mod entry;
mod stats;
mod store;
mod ttl_cache;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::Entry;
pub(crate) use stats::StatsRecorder;
pub use stats::CacheStats;
pub use store::Store;
pub use ttl_cache::Cache;
