//! Transient-failure retry primitive.
//!
//! The primary source's API likes to give up on connections, so a fetch may
//! take several tries to go through. [`RetryPolicy`] re-attempts an async
//! operation while its error classifies as [`RetryClass::Retry`], sleeping
//! between attempts.
//!
//! The production default is unbounded: data unavailability must never be
//! silently converted into a wrong answer, so the policy keeps trying until
//! the fetch succeeds. An unbounded policy is still cancellable - run the
//! reconciliation on its own task and abort it; dropping the future stops
//! the loop with no partial state to roll back. Tests bound the policy with
//! [`RetryPolicy::with_max_attempts`].

use std::future::Future;
use std::time::Duration;

use log::warn;

use crate::errors::{MarketDataError, RetryClass};

/// Retry policy for transient fetch failures.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Maximum number of attempts; `None` retries until success or
    /// cancellation.
    max_attempts: Option<u32>,
    /// Pause between attempts.
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Policy bounded to `max_attempts` attempts.
    pub fn with_max_attempts(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay,
        }
    }

    /// Run `op`, re-attempting while it fails with a [`RetryClass::Retry`]
    /// error.
    ///
    /// Terminal errors are returned immediately. When the policy is bounded
    /// and attempts run out, the last transient error is returned.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, MarketDataError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, MarketDataError>>,
    {
        let mut attempt: u32 = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.retry_class() == RetryClass::Retry => {
                    if let Some(max) = self.max_attempts {
                        if attempt >= max {
                            return Err(err);
                        }
                    }
                    warn!(
                        "Transient fetch failure (attempt {}): {}. Retrying in {:?}",
                        attempt, err, self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
