use crate::error::{Result, TftError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One token-bucket quota: at most `requests` per `window_secs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Bucket capacity
    pub requests: u32,
    /// Time for an empty bucket to refill completely (in seconds)
    pub window_secs: u64,
}

impl QuotaConfig {
    pub const fn new(requests: u32, window_secs: u64) -> Self {
        Self {
            requests,
            window_secs,
        }
    }

    /// Get the window as a Duration
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Reject quotas that can never admit a request
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.requests == 0 {
            return Err(TftError::Config(format!(
                "Rate limit requests must be > 0 for {} quota",
                name
            )));
        }
        if self.window_secs == 0 {
            return Err(TftError::Config(format!(
                "Rate limit window must be > 0 for {} quota",
                name
            )));
        }
        Ok(())
    }
}

/// Both quotas an API key is subject to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Short window limiting bursts
    #[serde(default = "default_burst")]
    pub burst: QuotaConfig,
    /// Long window limiting sustained throughput
    #[serde(default = "default_sustained")]
    pub sustained: QuotaConfig,
}

fn default_burst() -> QuotaConfig {
    RateLimitConfig::development().burst
}

fn default_sustained() -> QuotaConfig {
    RateLimitConfig::development().sustained
}

impl RateLimitConfig {
    /// Limits of a development key: 20 requests / 1s and 100 requests / 2min
    pub const fn development() -> Self {
        Self {
            burst: QuotaConfig::new(20, 1),
            sustained: QuotaConfig::new(100, 120),
        }
    }

    /// Limits of a production key: 500 requests / 10s and 30000 requests / 10min
    pub const fn production() -> Self {
        Self {
            burst: QuotaConfig::new(500, 10),
            sustained: QuotaConfig::new(30_000, 600),
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> Result<()> {
        self.burst.validate("burst")?;
        self.sustained.validate("sustained")
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::development()
    }
}
