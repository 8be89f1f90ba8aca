//! The single place that talks to the network.
//!
//! Every request is addressed against a routing domain, waits on the shared
//! [`DualRateLimiter`], carries the API key header, and is accepted only with
//! status 200 and a body that decodes into the expected record. Nothing is
//! retried.

mod endpoint;

pub use endpoint::Endpoint;

use crate::config::{ApiConfig, ROUTING_PLACEHOLDER};
use crate::context::Context;
use crate::error::{Result, TftError};
use crate::metrics::{self, Outcome, Timer};
use crate::rate_limit::DualRateLimiter;
use crate::routing::RegionRouter;
use crate::secrets::ApiKey;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub struct RequestDispatcher {
    http: reqwest::Client,
    base_url: String,
    key_header: HeaderName,
    key_value: HeaderValue,
    limiter: Arc<DualRateLimiter>,
    router: Arc<RegionRouter>,
}

impl RequestDispatcher {
    pub fn new(
        api: &ApiConfig,
        api_key: ApiKey,
        limiter: Arc<DualRateLimiter>,
        router: Arc<RegionRouter>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TftError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let key_header = HeaderName::from_bytes(api.key_header.as_bytes()).map_err(|_| {
            TftError::Config(format!("Invalid API key header name: {}", api.key_header))
        })?;

        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| TftError::Config("API key is not a valid header value".to_string()))?;
        key_value.set_sensitive(true);

        Ok(Self {
            http,
            base_url: api.base_url.clone(),
            key_header,
            key_value,
            limiter,
            router,
        })
    }

    pub fn limiter(&self) -> &Arc<DualRateLimiter> {
        &self.limiter
    }

    /// Compose the address of `endpoint` on `routing`
    pub fn url_for(&self, routing: &str, endpoint: &Endpoint<'_>) -> Result<Url> {
        match self.router.scope_of(routing) {
            None => return Err(TftError::UnknownRoutingDomain(routing.to_string())),
            Some(scope) if scope != endpoint.scope() => {
                return Err(TftError::WrongRoutingScope {
                    domain: routing.to_string(),
                    expected: endpoint.scope(),
                })
            }
            Some(_) => {}
        }

        let base = self.base_url.replace(ROUTING_PLACEHOLDER, routing);
        let mut url = Url::parse(&base)
            .map_err(|e| TftError::Config(format!("Invalid base URL {}: {}", base, e)))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| TftError::Config(format!("Base URL cannot have a path: {}", base)))?;
            segments.pop_if_empty().extend(endpoint.segments());
        }

        let query = endpoint.query();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Fetch `endpoint` from `routing` and decode the body as `T`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        routing: &str,
        endpoint: Endpoint<'_>,
    ) -> Result<T> {
        let url = self.url_for(routing, &endpoint)?;
        let url_str = url.to_string();
        let name = endpoint.name();

        if let Err(reason) = self.limiter.acquire(ctx).await {
            debug!(url = %url_str, %reason, "Cancelled while waiting for rate limit");
            metrics::record_request(name, Outcome::Cancelled);
            return Err(TftError::RateLimitCancelled {
                url: url_str,
                reason,
            });
        }

        debug!(url = %url_str, endpoint = name, "Sending request");
        let timer = Timer::new(name);

        let request = self
            .http
            .get(url)
            .header(self.key_header.clone(), self.key_value.clone());

        let response = tokio::select! {
            biased;
            reason = ctx.cancelled() => {
                metrics::record_request(name, Outcome::Cancelled);
                return Err(TftError::RequestCancelled { url: url_str, reason });
            }
            response = request.send() => response,
        };

        let response = match response {
            Ok(response) => response,
            Err(source) => {
                warn!(url = %url_str, error = %source, "Request failed");
                metrics::record_request(name, Outcome::TransportError);
                return Err(TftError::Transport {
                    url: url_str,
                    source,
                });
            }
        };

        let status = response.status();
        timer.record();
        metrics::record_request(name, Outcome::Status(status.as_u16()));

        if status != StatusCode::OK {
            debug!(url = %url_str, status = status.as_u16(), "Unexpected response status");
            return Err(TftError::HttpStatus {
                url: url_str,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = tokio::select! {
            biased;
            reason = ctx.cancelled() => {
                return Err(TftError::RequestCancelled { url: url_str, reason });
            }
            body = response.bytes() => body,
        };
        let body = body.map_err(|source| TftError::Transport {
            url: url_str.clone(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| {
            debug!(url = %url_str, error = %source, "Failed to decode response body");
            TftError::Decode {
                url: url_str,
                source,
            }
        })
    }
}
