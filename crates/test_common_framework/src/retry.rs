//! Retry with exponential backoff.
//!
//! A [`RetryPolicy`] runs an operation up to `max_attempts` times. After each
//! retryable failure it sleeps for the current delay and multiplies the delay
//! by `backoff`. When the attempt budget is exhausted the last failure is
//! returned unchanged; failures the caller does not classify as retryable are
//! returned immediately without any delay.

use std::time::Duration;

use tracing::{error, warn};

use crate::error::FrameworkError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_BACKOFF: f64 = 2.0;

/// Blocks between attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the calling thread. There is no cancellation once a wait starts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    backoff: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration, backoff: f64) -> Result<Self, FrameworkError> {
        if max_attempts == 0 {
            return Err(FrameworkError::InvalidRetryPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if !backoff.is_finite() || backoff < 0.0 {
            return Err(FrameworkError::InvalidRetryPolicy(format!(
                "backoff must be a finite non-negative number, got {backoff}"
            )));
        }
        Ok(Self {
            max_attempts,
            delay,
            backoff,
        })
    }

    /// Like [`RetryPolicy::new`] with the initial delay given in seconds.
    pub fn from_secs_f64(
        max_attempts: u32,
        delay_secs: f64,
        backoff: f64,
    ) -> Result<Self, FrameworkError> {
        let delay = Duration::try_from_secs_f64(delay_secs).map_err(|_| {
            FrameworkError::InvalidRetryPolicy(format!(
                "delay must be a finite non-negative number of seconds, got {delay_secs}"
            ))
        })?;
        Self::new(max_attempts, delay, backoff)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn backoff(&self) -> f64 {
        self.backoff
    }

    /// The waits taken between attempts when every attempt fails.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let backoff = self.backoff;
        std::iter::successors(Some(self.delay), move |current| {
            Some(scale_delay(*current, backoff))
        })
        .take(self.max_attempts.saturating_sub(1) as usize)
    }

    /// Retry `op` on every failure, sleeping on the calling thread.
    pub fn retry<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        self.retry_with(&ThreadSleeper, |_: &E| true, op)
    }

    /// Retry `op` only on failures for which `is_retryable` holds.
    pub fn retry_if<T, E, F, P>(&self, is_retryable: P, op: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: FnMut(&E) -> bool,
    {
        self.retry_with(&ThreadSleeper, is_retryable, op)
    }

    pub fn retry_with<T, E, F, P, S>(
        &self,
        sleeper: &S,
        mut is_retryable: P,
        mut op: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: FnMut(&E) -> bool,
        S: Sleeper + ?Sized,
    {
        let mut current_delay = self.delay;
        let mut attempt = 1u32;

        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(failure) if !is_retryable(&failure) => return Err(failure),
                Err(failure) if attempt >= self.max_attempts => {
                    error!(
                        attempts = attempt,
                        "operation failed after exhausting retry budget"
                    );
                    return Err(failure);
                }
                Err(_) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = current_delay.as_millis() as u64,
                        "operation failed; retrying"
                    );
                    sleeper.sleep(current_delay);
                    current_delay = scale_delay(current_delay, self.backoff);
                    attempt += 1;
                }
            }
        }
    }

    /// Turn `op` into a closure that applies this policy on every call.
    pub fn wrap<T, E, F>(self, mut op: F) -> impl FnMut() -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        move || self.retry(&mut op)
    }
}

fn scale_delay(current: Duration, backoff: f64) -> Duration {
    Duration::try_from_secs_f64(current.as_secs_f64() * backoff).unwrap_or(Duration::MAX)
}
