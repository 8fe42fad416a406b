//! Per-request execution context
//!
//! A [`RequestContext`] couples a cancellation token with a deadline. It is
//! derived from the server's root token, so shutting the server down cancels
//! every in-flight request, and it cancels itself when dropped, so a handler
//! future abandoned on client disconnect releases whatever the store started.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::{AppError, AppResult};

/// Deadline used when `now + timeout` is not representable
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

#[derive(Debug)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Instant,
    _guard: DropGuard,
}

impl RequestContext {
    /// Child context of `parent` that expires after `timeout`
    pub fn with_timeout(parent: &CancellationToken, timeout: Duration) -> Self {
        let token = parent.child_token();
        let now = Instant::now();
        Self {
            _guard: token.clone().drop_guard(),
            token,
            deadline: now.checked_add(timeout).unwrap_or(now + FAR_FUTURE),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[cfg(test)]
    fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Why this context is done, if it is
    pub fn err(&self) -> Option<AppError> {
        if self.token.is_cancelled() {
            Some(AppError::Cancelled)
        } else if Instant::now() >= self.deadline {
            Some(AppError::Timeout)
        } else {
            None
        }
    }

    pub fn check(&self) -> AppResult<()> {
        match self.err() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Resolves once the context is cancelled or its deadline passes
    pub async fn done(&self) -> AppError {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => AppError::Cancelled,
            _ = tokio::time::sleep_until(self.deadline) => AppError::Timeout,
        }
    }

    /// Drive `fut` to completion unless the context ends first
    pub async fn run<F, T>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.check()?;
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            res = fut => res,
        }
    }
}
