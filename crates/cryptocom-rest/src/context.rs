//! Per-call deadline and cancellation
//!
//! A [`CallContext`] bounds one request/response round trip. When its
//! deadline passes the call fails with [`TransportError::Timeout`]; when its
//! [`CancelHandle`] fires the call fails with [`TransportError::Cancelled`].
//! Neither outcome is ever reported as an exchange error.

use std::future::{pending, Future};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::transport::TransportError;

/// Fires cancellation for every context built from it
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Create a handle that has not fired
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Cancel every call waiting on this handle
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Check if [`cancel`](Self::cancel) was called
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    fn signal(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Deadline and cancellation for a single call
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

impl CallContext {
    /// Context with no deadline and no cancellation
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call once `timeout` has elapsed from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Fail the call at `deadline`
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Fail the call when `handle` is cancelled
    pub fn with_cancel(mut self, handle: &CancelHandle) -> Self {
        self.cancel = Some(handle.signal());
        self
    }

    /// Deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Check if the call should not start at all
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drive `fut` until it completes, the deadline passes or the call is
    /// cancelled
    pub async fn run<F, T>(&self, fut: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        if self.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if self.remaining() == Some(Duration::ZERO) {
            return Err(TransportError::Timeout);
        }

        let mut cancel = self.cancel.clone();
        let cancelled = async move {
            match cancel.as_mut() {
                // A dropped handle can never fire
                Some(rx) => {
                    if rx.wait_for(|fired| *fired).await.is_err() {
                        pending::<()>().await;
                    }
                }
                None => pending::<()>().await,
            }
        };
        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(TransportError::Cancelled),
            _ = expired => Err(TransportError::Timeout),
            result = fut => result,
        }
    }
}
