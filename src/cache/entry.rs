//! Cache Entry Module
//!
//! Defines the record stored for every key: a value and the instant it stops being valid.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single stored value paired with its absolute expiration deadline.
///
/// Entries are never updated in place. Setting a key again builds a new entry
/// and replaces the old one wholesale.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    valid_through: Instant,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates an entry that stays live for `ttl` from now.
    ///
    /// A zero `ttl` yields an entry that is already expired.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::with_deadline(value, deadline_after(Instant::now(), ttl))
    }

    /// Creates an entry with an explicit deadline.
    pub fn with_deadline(value: V, valid_through: Instant) -> Self {
        Self {
            value,
            valid_through,
        }
    }

    /// Returns the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the entry and returns the stored value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Returns the instant after which the entry is no longer live.
    pub fn valid_through(&self) -> Instant {
        self.valid_through
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// The deadline itself counts as expired, so a zero TTL is observed as
    /// expired even when the clock has not moved since the entry was created.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.valid_through
    }

    /// Checks whether the entry has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns how long the entry has left, or zero once it has expired.
    pub fn remaining(&self) -> Duration {
        self.valid_through.saturating_duration_since(Instant::now())
    }
}

/// `now + ttl`, clamped to a far-future instant instead of overflowing.
fn deadline_after(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl)
        .unwrap_or_else(|| now + Duration::from_secs(86_400 * 365 * 30))
}
