//! Keyed admission limiter

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;
use vr_shared::config::RateLimitConfig;

use super::token_bucket::TokenBucket;

/// Per-client-key admission gate
///
/// Buckets are created lazily on first observation of a key. One lock
/// serializes lookup-or-create and the refill/consume decision, so every
/// admission is atomic with respect to concurrent requests on the same or
/// different keys. The check itself is O(1) and never blocks on I/O.
///
/// The key map is bounded: a periodic sweep evicts buckets idle past the
/// configured window, and `max_keys` caps distinct keys by evicting the
/// stalest bucket when a new key would exceed it.
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new limiter from configuration
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Decide whether a request from `key` may proceed
    ///
    /// Denial is a normal outcome, not an error.
    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    /// Decision against an explicit clock reading
    pub fn allow_at(&self, key: &str, now: Instant) -> bool {
        if !self.config.enabled {
            return true;
        }

        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !buckets.contains_key(key) {
            if buckets.len() >= self.config.max_keys {
                Self::evict_stalest(&mut buckets);
            }
            buckets.insert(
                key.to_string(),
                TokenBucket::new(self.config.refill_per_second, self.config.burst, now),
            );
        }

        match buckets.get_mut(key) {
            Some(bucket) => bucket.allow_at(now),
            None => true,
        }
    }

    /// Remove buckets that have sat untouched past the idle window
    ///
    /// Returns the number of evicted keys.
    pub fn sweep_idle(&self) -> usize {
        self.sweep_idle_at(Instant::now())
    }

    /// Sweep against an explicit clock reading
    pub fn sweep_idle_at(&self, now: Instant) -> usize {
        let idle_after = Duration::from_secs(self.config.idle_eviction_seconds);
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let before = buckets.len();
        buckets.retain(|_, bucket| !bucket.is_idle(now, idle_after));
        let evicted = before - buckets.len();

        if evicted > 0 {
            debug!(
                evicted = evicted,
                tracked = buckets.len(),
                "Swept idle rate limiter buckets"
            );
        }
        evicted
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Seconds between sweeps, for the caller driving the eviction task
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.config.sweep_interval_seconds.max(1))
    }

    fn evict_stalest(buckets: &mut HashMap<String, TokenBucket>) {
        let stalest = buckets
            .iter()
            .min_by_key(|(_, bucket)| bucket.touched_at())
            .map(|(key, _)| key.clone());
        if let Some(key) = stalest {
            buckets.remove(&key);
        }
    }
}
