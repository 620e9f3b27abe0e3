//! Retry-with-exponential-backoff execution.
//!
//! A failed attempt `n` (zero-indexed) is followed by a sleep of
//! `base_delay * 2^n` before the next one, so delays run `base, 2*base,
//! 4*base, ...`. Any `Err` is retried; after the last attempt the error from
//! that attempt is returned as-is.
//!
//! Operations are `FnMut` closures. Whatever they capture is reused unchanged
//! on every attempt, so they must be safe to repeat.
//!
//! ```
//! use email_agent_guard::application::retry::{RetryPolicy, retry_with_backoff};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(3, Duration::ZERO);
//! let mut calls = 0;
//! let result: Result<u32, String> = retry_with_backoff(&policy, || {
//!     calls += 1;
//!     if calls < 3 { Err(format!("fail {calls}")) } else { Ok(calls) }
//! });
//!
//! assert_eq!(result, Ok(3));
//! ```

use std::cell::Cell;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Default number of attempts (`EMAIL_AGENT_LLM_RETRIES`).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay (`EMAIL_AGENT_LLM_RETRY_DELAY`).
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Attempt bound and base delay for one executor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` is clamped to at least one.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self::new(max_attempts, self.base_delay)
    }

    pub fn with_base_delay(self, base_delay: Duration) -> Self {
        Self::new(self.max_attempts, base_delay)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Delay slept after failed attempt `attempt` (zero-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Delays between attempts, one fewer than `max_attempts`.
    pub fn schedule(&self) -> BackoffSchedule {
        BackoffSchedule {
            policy: *self,
            next: 0,
        }
    }

    fn is_last(&self, attempt: u32) -> bool {
        attempt.saturating_add(1) >= self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

/// Iterator over the sleeps of a [`RetryPolicy`].
///
/// Also serves as the strategy for [`tokio_retry::Retry`].
#[derive(Debug, Clone)]
pub struct BackoffSchedule {
    policy: RetryPolicy,
    next: u32,
}

impl Iterator for BackoffSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.policy.is_last(self.next) {
            return None;
        }
        let delay = self.policy.delay_for(self.next);
        self.next += 1;
        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .policy
            .max_attempts
            .saturating_sub(1)
            .saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BackoffSchedule {}

/// Blocks the current thread between attempts.
#[cfg_attr(test, mockall::automock)]
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Runs `operation` until it succeeds or `policy` runs out of attempts,
/// blocking the calling thread between attempts.
///
/// # Errors
///
/// Returns the error produced by the final attempt, unchanged.
pub fn retry_with_backoff<T, E, F>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Result<T, E>,
{
    retry_with_backoff_using(policy, &ThreadSleeper, operation)
}

/// [`retry_with_backoff`] with an explicit [`Sleeper`].
///
/// # Errors
///
/// Returns the error produced by the final attempt, unchanged.
pub fn retry_with_backoff_using<T, E, F, S>(
    policy: &RetryPolicy,
    sleeper: &S,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Result<T, E>,
    S: Sleeper + ?Sized,
{
    let mut attempt = 0;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(e) => {
                if policy.is_last(attempt) {
                    log_exhausted(policy, &e);
                    return Err(e);
                }
                let delay = policy.delay_for(attempt);
                log_retry(attempt, delay, &e);
                sleeper.sleep(delay);
                attempt += 1;
            }
        }
    }
}

/// Async counterpart of [`retry_with_backoff`] built on `tokio-retry`.
///
/// Sleeps with the tokio timer, so the calling task yields instead of
/// blocking its thread. Attempt and logging behaviour is identical.
///
/// # Errors
///
/// Returns the error produced by the final attempt, unchanged.
pub async fn retry_with_backoff_async<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let policy = *policy;
    let attempt = Cell::new(0u32);

    let action = || {
        let current = attempt.get();
        attempt.set(current + 1);
        let fut = operation();
        async move {
            fut.await.inspect_err(|e| {
                if policy.is_last(current) {
                    log_exhausted(&policy, e);
                } else {
                    log_retry(current, policy.delay_for(current), e);
                }
            })
        }
    };

    tokio_retry::Retry::spawn(policy.schedule(), action).await
}

fn log_retry<E: Display>(attempt: u32, delay: Duration, error: &E) {
    tracing::warn!(
        attempt = attempt + 1,
        delay_ms = delay.as_millis() as u64,
        error = %error,
        "Attempt {} failed: {}. Retrying in {:?}...",
        attempt + 1,
        error,
        delay
    );
}

fn log_exhausted<E: Display>(policy: &RetryPolicy, error: &E) {
    tracing::error!(
        max_attempts = policy.max_attempts,
        error = %error,
        "All {} attempts failed: {}",
        policy.max_attempts,
        error
    );
}
