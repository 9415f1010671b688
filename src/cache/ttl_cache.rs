//! Cache Facade Module
//!
//! Expiration-aware API over the store, owning the sweeper's lifetime.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::{CacheStats, Entry, StatsRecorder, Store};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweeper;

// == Cache ==
/// In-process key-value cache where every entry carries its own TTL.
///
/// Reads hide expired entries immediately; a background sweeper physically
/// removes them once per cleanup interval. The sweeper runs until the token
/// passed to [`Cache::new`] is cancelled or the cache is dropped.
///
/// The cache is generic over one value type. Share it across tasks or threads
/// by wrapping it in an `Arc`.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use ttl_cache::{Cache, CacheConfig};
///
/// # #[tokio::main]
/// # async fn main() -> ttl_cache::Result<()> {
/// let token = CancellationToken::new();
/// let cache = Cache::new(token.clone(), CacheConfig::default())?;
///
/// cache.set("session", 42u32, Duration::from_secs(60));
/// assert_eq!(cache.get("session"), Some(42));
///
/// token.cancel();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cache<V> {
    store: Arc<Store<V>>,
    stats: Arc<StatsRecorder>,
    sweeper: JoinHandle<()>,
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts its sweeper, bound to `token`.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// - [`CacheError::InvalidConfig`] if the cleanup interval is zero
    /// - [`CacheError::NoRuntime`] if no tokio runtime is available
    pub fn new(token: CancellationToken, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(CacheError::NoRuntime);
        }

        let store = Arc::new(Store::new());
        let stats = Arc::new(StatsRecorder::default());
        let sweeper = spawn_sweeper(
            store.clone(),
            stats.clone(),
            config.cleanup_interval,
            token,
        );

        Ok(Self {
            store,
            stats,
            sweeper,
        })
    }

    // == Get ==
    /// Returns the value for `key` if it is present and not expired.
    ///
    /// Never-set, deleted and expired keys are indistinguishable.
    pub fn get(&self, key: &str) -> Option<V> {
        match self.store.load(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                Some(entry.into_value())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    ///
    /// A zero `ttl` stores an entry that is already expired: it is invisible
    /// to [`get`](Self::get) and stays in memory until swept or overwritten.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.store.store(key.into(), Entry::new(value, ttl));
    }

    // == Delete ==
    /// Removes `key`. Deleting a missing key is a no-op.
    pub fn delete(&self, key: &str) {
        self.store.delete(key);
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.store.len())
    }

    // == Length ==
    /// Number of physically stored entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns `true` while the background sweeper is still running.
    pub fn is_sweeping(&self) -> bool {
        !self.sweeper.is_finished()
    }
}

impl<V> Drop for Cache<V> {
    fn drop(&mut self) {
        if !self.sweeper.is_finished() {
            debug!("Cache dropped, aborting expiry sweeper");
            self.sweeper.abort();
        }
    }
}
