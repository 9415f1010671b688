//! Memoizes a slow lookup with a short TTL and shows the sweeper reclaiming it.
//!
//! Run with `RUST_LOG=ttl_cache=debug cargo run --example memoize`.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttl_cache::{Cache, CacheConfig, CancellationToken};

async fn slow_square(n: u64) -> u64 {
    tokio::time::sleep(Duration::from_millis(200)).await;
    n * n
}

async fn cached_square(cache: &Cache<u64>, n: u64) -> u64 {
    let key = n.to_string();
    if let Some(hit) = cache.get(&key) {
        return hit;
    }
    let value = slow_square(n).await;
    cache.set(key, value, Duration::from_millis(500));
    value
}

#[tokio::main]
async fn main() -> ttl_cache::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=debug,memoize=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let token = CancellationToken::new();
    let config = CacheConfig::new().with_cleanup_interval(Duration::from_millis(250));
    let cache = Cache::new(token.clone(), config)?;

    for n in [3, 4, 3, 3, 4] {
        let square = cached_square(&cache, n).await;
        info!(n, square, "computed");
    }

    tokio::time::sleep(Duration::from_secs(1)).await;
    info!(stats = ?cache.stats(), "after expiry");

    token.cancel();
    Ok(())
}
