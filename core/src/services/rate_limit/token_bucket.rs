//! Token bucket used for per-key admission decisions

use std::time::{Duration, Instant};

/// Continuously refilling token bucket
///
/// Starts full. Each admitted call consumes exactly one token; a denied
/// call consumes nothing. Refill accrues fractionally with elapsed time and
/// is capped at the burst size.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    tokens: f64,
    refill_per_second: f64,
    burst: f64,
    refilled_at: Instant,
    touched_at: Instant,
}

impl TokenBucket {
    /// Create a full bucket
    pub fn new(refill_per_second: f64, burst: u32, now: Instant) -> Self {
        let burst = f64::from(burst.max(1));
        Self {
            tokens: burst,
            refill_per_second: refill_per_second.max(0.0),
            burst,
            refilled_at: now,
            touched_at: now,
        }
    }

    /// Try to consume one token at `now`
    pub fn allow_at(&mut self, now: Instant) -> bool {
        self.refill(now);
        self.touched_at = now;
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Whether the bucket has gone unobserved for at least `idle_after`
    ///
    /// Past any idle window longer than burst/rate the bucket has refilled
    /// to capacity anyway, so evicting it forgets no outstanding debt.
    pub fn is_idle(&self, now: Instant, idle_after: Duration) -> bool {
        now.saturating_duration_since(self.touched_at) >= idle_after
    }

    /// When the bucket was last asked for a decision
    pub fn touched_at(&self) -> Instant {
        self.touched_at
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.refilled_at).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_per_second).min(self.burst);
        self.refilled_at = now;
    }
}
