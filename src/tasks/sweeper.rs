//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries so that
//! entries nobody reads again do not accumulate forever.

use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};

use crate::cache::{StatsRecorder, Store};

// == Sweep Report ==
/// Outcome of a single sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Entries inspected during the scan
    pub scanned: usize,
    /// Entries removed during the purge
    pub reclaimed: usize,
}

/// Removes every entry of `store` that is expired at the time of the call.
///
/// Runs in two phases: a scan that snapshots the keys of expired entries,
/// then a purge that deletes them. The store is never written while the scan
/// holds its read locks. A key re-set with a live entry between the two phases
/// survives the purge.
pub fn sweep_expired<V: Clone>(store: &Store<V>) -> SweepReport {
    let now = Instant::now();
    let mut scanned = 0;
    let mut expired = Vec::new();

    store.range(|key, entry| {
        scanned += 1;
        if entry.is_expired_at(now) {
            expired.push(key.to_string());
        }
        ControlFlow::Continue(())
    });

    let reclaimed = expired
        .iter()
        .filter(|key| store.delete_if_expired(key, now))
        .count();

    SweepReport { scanned, reclaimed }
}

/// Spawns the sweeper for `store`, bound to `token`.
///
/// The first sweep happens one full `period` after the call. Ticks missed
/// while a sweep was running are skipped. Cancelling `token` ends the task
/// before the next sweep starts.
pub(crate) fn spawn_sweeper<V>(
    store: Arc<Store<V>>,
    stats: Arc<StatsRecorder>,
    period: Duration,
    token: CancellationToken,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?period, "Starting expiry sweeper");

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    info!("Expiry sweeper stopped");
                    return;
                }
                _ = ticker.tick() => {}
            }

            // A panicking sweep must not take future sweeps down with it.
            match panic::catch_unwind(AssertUnwindSafe(|| sweep_expired(&store))) {
                Ok(report) => {
                    stats.record_sweep(report.reclaimed);
                    if report.reclaimed > 0 {
                        debug!(
                            scanned = report.scanned,
                            reclaimed = report.reclaimed,
                            "Expiry sweep reclaimed entries"
                        );
                    } else {
                        trace!(scanned = report.scanned, "Expiry sweep found nothing to reclaim");
                    }
                }
                Err(_) => error!("Expiry sweep panicked; retrying on next tick"),
            }
        }
    })
}
