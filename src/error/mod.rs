use crate::context::CancelReason;
use crate::routing::RoutingScope;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, TftError>;

/// Client error types
#[derive(Error, Debug)]
pub enum TftError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} not sent, cancelled while waiting for rate limit: {reason}")]
    RateLimitCancelled { url: String, reason: CancelReason },

    #[error("request to {url} cancelled while waiting for response: {reason}")]
    RequestCancelled { url: String, reason: CancelReason },

    #[error("request to {url} failed with status \"{status} {reason}\"")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("failed to decode response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {url} was an empty list")]
    EmptyList { url: String },

    #[error("unknown routing domain: {0:?}")]
    UnknownRoutingDomain(String),

    #[error("routing domain {domain:?} is not a {expected}")]
    WrongRoutingScope {
        domain: String,
        expected: RoutingScope,
    },

    #[error("{operation} failed for {target}: {source}")]
    Operation {
        operation: &'static str,
        target: String,
        #[source]
        source: Box<TftError>,
    },

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TftError {
    /// Wrap an error with the name of the operation and the id it targeted
    pub fn context(self, operation: &'static str, target: impl Into<String>) -> Self {
        TftError::Operation {
            operation,
            target: target.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all `Operation` layers removed
    pub fn root(&self) -> &TftError {
        let mut err = self;
        while let TftError::Operation { source, .. } = err {
            err = source;
        }
        err
    }

    /// HTTP status of the failed response, if the root cause is a bad status
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            TftError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the root cause is a cancelled context
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.root(),
            TftError::RateLimitCancelled { .. } | TftError::RequestCancelled { .. }
        )
    }
}

/// Per-match failures collected while scanning a match history.
///
/// Always returned alongside the matches that were fetched successfully.
#[derive(Debug, Default)]
pub struct AggregateError {
    failures: BTreeMap<String, TftError>,
}

impl AggregateError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, match_id: impl Into<String>, error: TftError) {
        self.failures.insert(match_id.into(), error);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn get(&self, match_id: &str) -> Option<&TftError> {
        self.failures.get(match_id)
    }

    /// Failed match ids, in sorted order
    pub fn match_ids(&self) -> impl Iterator<Item = &str> {
        self.failures.keys().map(String::as_str)
    }

    pub fn failures(&self) -> &BTreeMap<String, TftError> {
        &self.failures
    }

    /// Whether the scan was cut short by a cancelled context
    pub fn was_cancelled(&self) -> bool {
        self.failures.values().any(TftError::is_cancelled)
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "errors on fetching {} match(es):", self.failures.len())?;
        for (id, err) in &self.failures {
            write!(f, " [{}: {}]", id, err)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}
