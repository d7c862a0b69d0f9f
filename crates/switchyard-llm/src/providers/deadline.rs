//! Per-attempt deadline
//!
//! A `Deadline` pairs an expiry instant with a cancellation token. Work run
//! through [`Deadline::run`] is raced against both; whichever loses is
//! dropped, so an in-flight HTTP request is aborted rather than left to
//! finish in the background.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Deadline for one provider attempt
#[derive(Debug, Clone)]
pub struct Deadline {
    expires_at: Instant,
    budget: Duration,
    cancel: CancellationToken,
}

impl Deadline {
    /// Deadline `budget` from now, cancelled along with `cancel`
    #[must_use]
    pub fn new(budget: Duration, cancel: CancellationToken) -> Self {
        Self {
            expires_at: Instant::now() + budget,
            budget,
            cancel,
        }
    }

    /// Deadline with its own, never-cancelled token
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self::new(budget, CancellationToken::new())
    }

    /// Deadline with the same expiry and token, budgeted at the time left now
    #[must_use]
    pub fn remainder(&self) -> Self {
        Self {
            expires_at: self.expires_at,
            budget: self.remaining(),
            cancel: self.cancel.clone(),
        }
    }

    /// Instant at which the deadline expires
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Budget the deadline was created with
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left before expiry
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has passed
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Run `fut` until it completes, the deadline passes, or the token fires
    ///
    /// Expiry is reported as `Error::Timeout` carrying this deadline's budget.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let budget_ms = u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX);
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            _ = tokio::time::sleep_until(self.expires_at) => Err(Error::Timeout(budget_ms)),
            result = fut => result,
        }
    }
}
