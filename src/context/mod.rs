//! Cancellation signal carried through every client operation.
//!
//! A [`Context`] can be cancelled explicitly through a [`CancelHandle`],
//! by reaching its deadline, or both. Operations race their suspension
//! points (rate limiter wait, network wait) against [`Context::cancelled`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Why a context stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The handle was used to cancel explicitly
    Cancelled,
    /// The deadline passed
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => write!(f, "context cancelled"),
            CancelReason::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    signal: Option<watch::Receiver<bool>>,
}

/// Cancels every context derived from the one it was created with
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled
    pub fn background() -> Self {
        Self::default()
    }

    /// A context with an explicit cancel handle
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let ctx = Self {
            deadline: None,
            signal: Some(receiver),
        };
        (
            ctx,
            CancelHandle {
                sender: Arc::new(sender),
            },
        )
    }

    /// Derive a context that additionally expires after `timeout`.
    ///
    /// An existing earlier deadline is kept.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        };
        Self {
            deadline: Some(deadline),
            signal: self.signal.clone(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Non-blocking check of the cancellation state
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        if let Some(signal) = &self.signal {
            if *signal.borrow() {
                return Some(CancelReason::Cancelled);
            }
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_reason().is_some()
    }

    /// Resolves once the context is cancelled; pends forever for a background context
    pub async fn cancelled(&self) -> CancelReason {
        let explicit = async {
            match self.signal.clone() {
                Some(mut signal) => {
                    // A dropped handle can never cancel.
                    let closed = signal.wait_for(|cancelled| *cancelled).await.is_err();
                    if closed {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = explicit => CancelReason::Cancelled,
                _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => {
                explicit.await;
                CancelReason::Cancelled
            }
        }
    }
}
