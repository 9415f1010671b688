//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a plain `HashMap` model and the
//! sweeper against the expiry rule.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::cache::{Cache, Entry, Store};
use crate::config::CacheConfig;
use crate::tasks::sweep_expired;

// == Test Configuration ==
const LONG_TTL: Duration = Duration::from_secs(3600);

/// Current-thread runtime with a paused clock, so expiry is deterministic.
fn paused_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap()
}

fn new_cache() -> Cache<String> {
    Cache::new(CancellationToken::new(), CacheConfig::default()).unwrap()
}

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a pair and reading it back before expiry returns the same value.
    #[test]
    fn prop_set_then_get(key in key_strategy(), value in value_strategy()) {
        paused_runtime().block_on(async {
            let cache = new_cache();
            cache.set(key.clone(), value.clone(), LONG_TTL);

            prop_assert_eq!(cache.get(&key), Some(value));
            Ok::<(), TestCaseError>(())
        })?;
    }

    // A second set on the same key wins and leaves a single entry.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        paused_runtime().block_on(async {
            let cache = new_cache();
            cache.set(key.clone(), value1, LONG_TTL);
            cache.set(key.clone(), value2.clone(), LONG_TTL);

            prop_assert_eq!(cache.get(&key), Some(value2));
            prop_assert_eq!(cache.len(), 1);
            Ok::<(), TestCaseError>(())
        })?;
    }

    // After a delete the key reads as absent.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        paused_runtime().block_on(async {
            let cache = new_cache();
            cache.set(key.clone(), value, LONG_TTL);
            cache.delete(&key);

            prop_assert_eq!(cache.get(&key), None);
            prop_assert!(cache.is_empty());
            Ok::<(), TestCaseError>(())
        })?;
    }

    // Any sequence of operations behaves like a HashMap, and the hit and miss
    // counters match what the model observed.
    #[test]
    fn prop_matches_hashmap_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        paused_runtime().block_on(async {
            let cache = new_cache();
            let mut model: HashMap<String, String> = HashMap::new();
            let mut expected_hits = 0;
            let mut expected_misses = 0;

            for op in ops {
                match op {
                    CacheOp::Set { key, value } => {
                        cache.set(key.clone(), value.clone(), LONG_TTL);
                        model.insert(key, value);
                    }
                    CacheOp::Get { key } => {
                        let expected = model.get(&key).cloned();
                        if expected.is_some() {
                            expected_hits += 1;
                        } else {
                            expected_misses += 1;
                        }
                        prop_assert_eq!(cache.get(&key), expected);
                    }
                    CacheOp::Delete { key } => {
                        cache.delete(&key);
                        model.remove(&key);
                    }
                }
            }

            let stats = cache.stats();
            prop_assert_eq!(stats.hits, expected_hits);
            prop_assert_eq!(stats.misses, expected_misses);
            prop_assert_eq!(stats.total_entries, model.len());
            Ok::<(), TestCaseError>(())
        })?;
    }

    // A sweep removes exactly the entries whose deadline has passed.
    #[test]
    fn prop_sweep_removes_exactly_expired(
        ttls in prop::collection::hash_map(key_strategy(), 0u64..50, 1..20),
        elapsed_ms in 0u64..60
    ) {
        paused_runtime().block_on(async {
            let store = Store::new();
            for (key, ttl) in &ttls {
                store.store(key.clone(), Entry::new(*ttl, Duration::from_millis(*ttl)));
            }

            time::advance(Duration::from_millis(elapsed_ms)).await;
            let report = sweep_expired(&store);

            let expected_live: HashSet<&String> = ttls
                .iter()
                .filter(|(_, ttl)| **ttl > elapsed_ms)
                .map(|(key, _)| key)
                .collect();

            prop_assert_eq!(report.scanned, ttls.len());
            prop_assert_eq!(report.reclaimed, ttls.len() - expected_live.len());
            prop_assert_eq!(store.len(), expected_live.len());
            for key in expected_live {
                prop_assert!(store.load(key).is_some(), "live key '{}' was swept", key);
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
