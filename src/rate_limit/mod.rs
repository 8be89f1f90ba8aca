//! Client-side rate limiting
//!
//! Every API key is subject to two quotas at once, a short burst window and
//! a longer sustained window. [`DualRateLimiter`] models each as a token
//! bucket and hands out a permit only when both have a token.
//!
//! # Example
//!
//! ```rust,no_run
//! use tft_stats::context::Context;
//! use tft_stats::rate_limit::{DualRateLimiter, RateLimitConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let limiter = DualRateLimiter::new(RateLimitConfig::development()).unwrap();
//!
//!     // Blocks until both buckets have a token
//!     limiter.acquire(&Context::background()).await.unwrap();
//! }
//! ```

mod bucket;
mod limiter;
pub mod types;

pub use limiter::DualRateLimiter;
pub use types::{QuotaConfig, RateLimitConfig};
