//! Single token bucket with continuous refill.

use super::types::QuotaConfig;
use std::time::Duration;
use tokio::time::Instant;

/// A token bucket that starts full and refills at `requests / window`.
///
/// Tokens are kept in integer units: one token is worth `window` in
/// nanoseconds and every elapsed nanosecond adds `requests` units, so refill
/// is exact for any quota. Not synchronized; [`super::DualRateLimiter`] owns
/// buckets behind a mutex.
#[derive(Debug)]
pub struct TokenBucket {
    requests: u32,
    /// Units per token
    cost: u128,
    /// Units of a full bucket
    full: u128,
    units: u128,
    last_refill: Instant,
}

impl TokenBucket {
    /// Callers pass a validated quota; `requests` and `window_secs` are non-zero
    pub fn new(quota: QuotaConfig, now: Instant) -> Self {
        let cost = quota.window().as_nanos();
        let full = cost.saturating_mul(u128::from(quota.requests));
        Self {
            requests: quota.requests,
            cost,
            full,
            units: full,
            last_refill: now,
        }
    }

    /// Bring the token count up to date
    pub fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_nanos();
        let added = elapsed.saturating_mul(u128::from(self.requests));
        self.units = self.units.saturating_add(added).min(self.full);
        self.last_refill = now;
    }

    /// Time until one whole token is available, zero if one is available now.
    ///
    /// Rounded up, so a refill after sleeping this long always yields a token.
    pub fn time_until_ready(&self) -> Duration {
        if self.units >= self.cost {
            return Duration::ZERO;
        }
        let missing = self.cost - self.units;
        let rate = u128::from(self.requests.max(1));
        let nanos = missing.div_ceil(rate);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }

    /// Take one token if a whole one is available
    pub fn try_take(&mut self) -> bool {
        if self.units < self.cost {
            return false;
        }
        self.units -= self.cost;
        true
    }

    /// Whole tokens currently available
    pub fn available(&self) -> u32 {
        if self.cost == 0 {
            return self.requests;
        }
        u32::try_from(self.units / self.cost).unwrap_or(u32::MAX)
    }
}
