//! Retry execution engine
//!
//! A fixed-delay retry loop over a zero-argument operation. The operation's
//! own error type flows straight through: the error of the final attempt is
//! returned unchanged.

use std::fmt::Debug;
use std::future::Future;
use std::time::Instant;

use crate::output::StderrSink;
use crate::types::RetryPolicy;

use super::observer::{RetryObserver, SinkObserver};
use super::sleeper::{Sleeper, ThreadSleeper};

/// Call `predicate` up to `attempts` times, sleeping `sleep_seconds` between
/// failed attempts
///
/// - The first `Ok` is returned immediately.
/// - A failed attempt that is not the last one is reported on standard error
///   as `Encountered an exception: ...`, followed by the delay.
/// - The last attempt's `Err` is returned as-is, with no delay after it.
///
/// `attempts` below one is treated as one. Negative or non-finite
/// `sleep_seconds` means no delay.
///
/// # Example
///
/// ```rust
/// use sdk_testing_core::retry::try_throws_n_times;
///
/// let mut calls = 0;
/// let result: Result<&str, String> = try_throws_n_times(
///     || {
///         calls += 1;
///         if calls < 3 {
///             Err(format!("not ready ({calls})"))
///         } else {
///             Ok("ok")
///         }
///     },
///     3,
///     0.0,
/// );
///
/// assert_eq!(result, Ok("ok"));
/// assert_eq!(calls, 3);
/// ```
pub fn try_throws_n_times<F, T, E>(predicate: F, attempts: u32, sleep_seconds: f64) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Debug,
{
    RetryInvoker::new(RetryPolicy::new(attempts, sleep_seconds)).invoke(predicate)
}

/// A retry invoker with configurable policy, sleeper, and observer
///
/// # Example
///
/// ```rust
/// use sdk_testing_core::output::MemorySink;
/// use sdk_testing_core::retry::{RecordingSleeper, RetryInvoker, SinkObserver};
/// use sdk_testing_core::types::RetryPolicy;
///
/// let sink = MemorySink::new();
/// let sleeper = RecordingSleeper::new();
///
/// let result: Result<(), &str> = RetryInvoker::new(RetryPolicy::new(3, 1.0))
///     .with_sleeper(sleeper.clone())
///     .with_observer(SinkObserver::new(sink.clone()))
///     .invoke(|| Err("still failing"));
///
/// assert_eq!(result, Err("still failing"));
/// assert_eq!(sleeper.count(), 2);
/// assert_eq!(sink.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RetryInvoker<S = ThreadSleeper, O = SinkObserver<StderrSink>> {
    policy: RetryPolicy,
    sleeper: S,
    observer: O,
}

impl RetryInvoker<ThreadSleeper, SinkObserver<StderrSink>> {
    /// Create an invoker that sleeps on the current thread and reports
    /// retried failures on standard error
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            sleeper: ThreadSleeper,
            observer: SinkObserver::stderr(),
        }
    }
}

impl<S, O> RetryInvoker<S, O> {
    /// Set the sleeper used between attempts
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryInvoker<S2, O> {
        RetryInvoker {
            policy: self.policy,
            sleeper,
            observer: self.observer,
        }
    }

    /// Set the observer
    pub fn with_observer<O2>(self, observer: O2) -> RetryInvoker<S, O2> {
        RetryInvoker {
            policy: self.policy,
            sleeper: self.sleeper,
            observer,
        }
    }

    /// The policy in use
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<S, O> RetryInvoker<S, O>
where
    S: Sleeper,
    O: RetryObserver,
{
    /// Execute a blocking operation with retry logic
    pub fn invoke<F, T, E>(&self, mut predicate: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Debug,
    {
        let max_attempts = self.policy.effective_attempts();
        let delay = self.policy.sleep_duration();
        let start = Instant::now();
        let mut attempt = 1;

        loop {
            self.observer.on_attempt_start(attempt, max_attempts);

            match predicate() {
                Ok(value) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok(value);
                }
                Err(err) if attempt >= max_attempts => {
                    self.observer.on_exhausted(attempt, &err);
                    return Err(err);
                }
                Err(err) => {
                    self.observer.on_attempt_failed(attempt, &err, delay);
                    self.sleeper.sleep(delay);
                }
            }

            attempt += 1;
        }
    }
}

impl<S, O> RetryInvoker<S, O>
where
    O: RetryObserver,
{
    /// Execute an async operation with retry logic
    ///
    /// Same contract as [`RetryInvoker::invoke`], except that the delay is a
    /// `tokio::time::sleep` and the configured sleeper is not used.
    pub async fn invoke_async<F, Fut, T, E>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Debug,
    {
        let max_attempts = self.policy.effective_attempts();
        let delay = self.policy.sleep_duration();
        let start = Instant::now();
        let mut attempt = 1;

        loop {
            self.observer.on_attempt_start(attempt, max_attempts);

            match op().await {
                Ok(value) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok(value);
                }
                Err(err) if attempt >= max_attempts => {
                    self.observer.on_exhausted(attempt, &err);
                    return Err(err);
                }
                Err(err) => {
                    self.observer.on_attempt_failed(attempt, &err, delay);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }

            attempt += 1;
        }
    }
}
