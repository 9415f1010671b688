//! Configuration Module
//!
//! Settings resolved once, before the sweeper starts.

use std::time::Duration;

use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds};

use crate::error::{CacheError, Result};

/// Default period between sweeps.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(30);

fn default_cleanup_interval() -> Duration {
    DEFAULT_CLEANUP_INTERVAL
}

/// Cache configuration parameters.
///
/// Can be built in code or deserialized from a host application's config file:
///
/// ```toml
/// cleanup_interval_ms = 500
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// How often the sweeper scans for expired entries
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "cleanup_interval_ms", default = "default_cleanup_interval")]
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the sweep period.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Rejects values the sweeper cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cleanup_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "cleanup interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}
