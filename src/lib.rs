//! tft-stats - a rate-limited client for the Teamfight Tactics API
//!
//! Every call funnels through one [`dispatcher::RequestDispatcher`], which
//! waits on a dual-window [`rate_limit::DualRateLimiter`] before talking to
//! the network. [`client::TftClient`] exposes the read operations and
//! [`aggregate::matches_in_set`] composes them into a match-history scan.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod routing;
pub mod secrets;

pub use aggregate::{matches_in_set, SetMatches};
pub use client::TftClient;
pub use config::ClientConfig;
pub use context::{CancelHandle, Context};
pub use error::{AggregateError, Result, TftError};

/// Initialize tracing/logging
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tft_stats=info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
