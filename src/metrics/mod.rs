//! Metric names and recording helpers.
//!
//! Only the `metrics` facade is used here; without an installed recorder every
//! call is a no-op. Binaries that want to export the numbers install their own
//! recorder and call [`describe_metrics`] once.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

pub const REQUESTS_TOTAL: &str = "tft_api_requests_total";
pub const REQUEST_DURATION: &str = "tft_api_request_duration_seconds";
pub const RATE_LIMIT_WAIT: &str = "tft_rate_limit_wait_seconds";

/// Register all metrics with descriptions
pub fn describe_metrics() {
    describe_counter!(
        REQUESTS_TOTAL,
        "Total number of requests sent to the API, by endpoint and outcome"
    );
    describe_histogram!(
        REQUEST_DURATION,
        "API response latencies in seconds, by endpoint"
    );
    describe_histogram!(
        RATE_LIMIT_WAIT,
        "Time spent waiting for the rate limiter in seconds"
    );
}

/// Outcome label of a dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Status(u16),
    Cancelled,
    TransportError,
}

impl Outcome {
    pub fn label(&self) -> String {
        match self {
            Outcome::Status(status) => status.to_string(),
            Outcome::Cancelled => "cancelled".to_string(),
            Outcome::TransportError => "transport_error".to_string(),
        }
    }
}

/// Record a request outcome
pub fn record_request(endpoint: &'static str, outcome: Outcome) {
    counter!(REQUESTS_TOTAL, "endpoint" => endpoint, "status" => outcome.label()).increment(1);
}

/// Record how long an acquire waited for tokens
pub fn record_rate_limit_wait(seconds: f64) {
    histogram!(RATE_LIMIT_WAIT).record(seconds);
}

/// Timer for measuring API latency
pub struct Timer {
    start: Instant,
    endpoint: &'static str,
}

impl Timer {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Record the latency once a response arrived
    pub fn record(self) {
        histogram!(REQUEST_DURATION, "endpoint" => self.endpoint).record(self.elapsed());
    }
}
