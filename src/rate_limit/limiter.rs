use super::bucket::TokenBucket;
use super::types::RateLimitConfig;
use crate::context::{CancelReason, Context};
use crate::error::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Gate that admits a request only when both the burst and the sustained
/// quota have a token, consuming one from each.
///
/// Waiters are served in arrival order: the fair `queue` mutex admits one
/// waiter at a time to wait on the buckets.
pub struct DualRateLimiter {
    config: RateLimitConfig,
    queue: Mutex<()>,
    buckets: Mutex<Buckets>,
    acquired: AtomicU64,
}

struct Buckets {
    burst: TokenBucket,
    sustained: TokenBucket,
}

impl DualRateLimiter {
    /// Create a limiter, rejecting quotas that can never admit a request
    pub fn new(config: RateLimitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: RateLimitConfig) -> Self {
        let now = Instant::now();
        Self {
            config,
            queue: Mutex::new(()),
            buckets: Mutex::new(Buckets {
                burst: TokenBucket::new(config.burst, now),
                sustained: TokenBucket::new(config.sustained, now),
            }),
            acquired: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Wait for a permit from both quotas.
    ///
    /// Returns the cancel reason if `ctx` is cancelled first, in which case
    /// no token is consumed.
    pub async fn acquire(&self, ctx: &Context) -> std::result::Result<(), CancelReason> {
        if let Some(reason) = ctx.cancel_reason() {
            trace!(%reason, "Context already cancelled, not acquiring");
            return Err(reason);
        }

        let started = Instant::now();
        let mut waited = false;
        let result = tokio::select! {
            biased;
            reason = ctx.cancelled() => Err(reason),
            _ = self.acquire_in_turn(&mut waited) => Ok(()),
        };

        if waited {
            let elapsed = started.elapsed();
            debug!(
                wait_ms = elapsed.as_millis() as u64,
                acquired = result.is_ok(),
                "Waited on rate limiter"
            );
            crate::metrics::record_rate_limit_wait(elapsed.as_secs_f64());
        }

        result
    }

    /// Take one token from both buckets, waiting behind earlier callers.
    ///
    /// Sets `waited` once the call has to queue or sleep.
    async fn acquire_in_turn(&self, waited: &mut bool) {
        let _turn = match self.queue.try_lock() {
            Ok(turn) => turn,
            Err(_) => {
                *waited = true;
                self.queue.lock().await
            }
        };

        loop {
            let wait = {
                let mut buckets = self.buckets.lock().await;
                let now = Instant::now();
                buckets.burst.refill(now);
                buckets.sustained.refill(now);

                let wait = buckets
                    .burst
                    .time_until_ready()
                    .max(buckets.sustained.time_until_ready());

                if wait.is_zero() {
                    let burst = buckets.burst.try_take();
                    let sustained = buckets.sustained.try_take();
                    debug_assert!(burst && sustained);
                    self.acquired.fetch_add(1, Ordering::SeqCst);
                    return;
                }
                wait
            };

            trace!(wait_ms = wait.as_millis() as u64, "Rate limit reached, sleeping");
            *waited = true;
            tokio::time::sleep(wait).await;
        }
    }

    /// Whole tokens available in the (burst, sustained) buckets
    pub async fn available(&self) -> (u32, u32) {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();
        buckets.burst.refill(now);
        buckets.sustained.refill(now);
        (buckets.burst.available(), buckets.sustained.available())
    }

    /// Total number of permits granted
    pub fn acquired(&self) -> u64 {
        self.acquired.load(Ordering::SeqCst)
    }
}

impl Default for DualRateLimiter {
    fn default() -> Self {
        Self::with_valid_config(RateLimitConfig::development())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::types::QuotaConfig;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_test::{assert_pending, assert_ready};

    fn limiter(burst: QuotaConfig, sustained: QuotaConfig) -> DualRateLimiter {
        DualRateLimiter::new(RateLimitConfig { burst, sustained }).unwrap()
    }

    #[test]
    fn test_empty_quota_rejected() {
        let result = DualRateLimiter::new(RateLimitConfig {
            burst: QuotaConfig::new(0, 1),
            sustained: QuotaConfig::new(100, 120),
        });
        assert!(matches!(result, Err(crate::error::TftError::Config(_))));

        let result = DualRateLimiter::new(RateLimitConfig {
            burst: QuotaConfig::new(20, 1),
            sustained: QuotaConfig::new(100, 0),
        });
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_allows_capacity_then_blocks() {
        let limiter = limiter(QuotaConfig::new(3, 1), QuotaConfig::new(100, 120));
        let ctx = Context::background();

        for _ in 0..3 {
            let mut acquire = tokio_test::task::spawn(limiter.acquire(&ctx));
            assert_ready!(acquire.poll()).unwrap();
        }
        assert_eq!(limiter.acquired(), 3);

        let mut fourth = tokio_test::task::spawn(limiter.acquire(&ctx));
        assert_pending!(fourth.poll());
        assert_eq!(limiter.acquired(), 3);

        // One token regenerates every 333ms
        tokio::time::advance(Duration::from_millis(400)).await;
        assert_ready!(fourth.poll()).unwrap();
        assert_eq!(limiter.acquired(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sustained_quota_blocks_with_burst_tokens_left() {
        let limiter = limiter(QuotaConfig::new(10, 1), QuotaConfig::new(3, 120));
        let ctx = Context::background();

        for _ in 0..3 {
            limiter.acquire(&ctx).await.unwrap();
        }
        assert_eq!(limiter.available().await, (7, 0));

        let mut fourth = tokio_test::task::spawn(limiter.acquire(&ctx));
        assert_pending!(fourth.poll());

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_pending!(fourth.poll());

        // One sustained token every 40s
        tokio::time::advance(Duration::from_secs(11)).await;
        assert_ready!(fourth.poll()).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquires_never_exceed_capacity() {
        let limiter = Arc::new(limiter(QuotaConfig::new(5, 1), QuotaConfig::new(100, 120)));

        let mut handles = Vec::new();
        for _ in 0..12 {
            let limiter = limiter.clone();
            handles.push(tokio::spawn(async move {
                limiter.acquire(&Context::background()).await
            }));
        }

        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(limiter.acquired(), 5);
        let (burst, sustained) = limiter.available().await;
        assert_eq!(burst, 0);
        assert_eq!(sustained, 95);

        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(limiter.acquired(), 12);
    }

    #[tokio::test]
    async fn test_cancelled_context_consumes_nothing() {
        let limiter = limiter(QuotaConfig::new(2, 1), QuotaConfig::new(10, 120));
        let (ctx, handle) = Context::with_cancel();
        handle.cancel();

        let result = limiter.acquire(&ctx).await;

        assert_eq!(result, Err(CancelReason::Cancelled));
        assert_eq!(limiter.acquired(), 0);
        assert_eq!(limiter.available().await, (2, 10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_while_waiting() {
        let limiter = limiter(QuotaConfig::new(1, 60), QuotaConfig::new(10, 120));
        let ctx = Context::background();
        limiter.acquire(&ctx).await.unwrap();

        let short = ctx.with_timeout(Duration::from_secs(5));
        let result = limiter.acquire(&short).await;

        assert_eq!(result, Err(CancelReason::DeadlineExceeded));
        assert_eq!(limiter.acquired(), 1);

        // The abandoned wait does not hold the queue
        limiter.acquire(&ctx).await.unwrap();
        assert_eq!(limiter.acquired(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiters_served_in_arrival_order() {
        let limiter = Arc::new(limiter(QuotaConfig::new(1, 1), QuotaConfig::new(100, 120)));
        limiter.acquire(&Context::background()).await.unwrap();

        let order = Arc::new(Mutex::new(Vec::new()));
        let mut handles = Vec::new();
        for i in 0..4 {
            let limiter = limiter.clone();
            let order = order.clone();
            handles.push(tokio::spawn(async move {
                limiter.acquire(&Context::background()).await.unwrap();
                order.lock().await.push(i);
            }));
            tokio::task::yield_now().await;
        }

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*order.lock().await, vec![0, 1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_uneven_rate_never_exceeds_quota() {
        for (requests, window_secs) in [(13, 9), (11, 7), (7, 3)] {
            let quota = QuotaConfig::new(requests, window_secs);
            let limiter = limiter(quota, QuotaConfig::new(u32::MAX, 1));
            let ctx = Context::background();
            let start = Instant::now();

            let rounds = 3 * requests as u64 + 5;
            for _ in 0..rounds {
                limiter.acquire(&ctx).await.unwrap();
            }

            // Beyond the initial full bucket, each token needs window / requests
            let refilled = rounds - requests as u64;
            let min_elapsed = quota.window() * refilled as u32 / requests;
            assert!(
                start.elapsed() >= min_elapsed,
                "{}/{}s admitted {} requests in {:?}",
                requests,
                window_secs,
                rounds,
                start.elapsed()
            );
            assert_eq!(limiter.acquired(), rounds);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_real_waits_are_flagged() {
        let limiter = limiter(QuotaConfig::new(1, 1), QuotaConfig::new(100, 120));

        let mut waited = false;
        limiter.acquire_in_turn(&mut waited).await;
        assert!(!waited);

        let mut waited = false;
        limiter.acquire_in_turn(&mut waited).await;
        assert!(waited);
        assert_eq!(limiter.acquired(), 2);
    }
}
