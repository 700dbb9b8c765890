//! Retry observation and logging
//!
//! This module provides the `RetryObserver` trait for monitoring retry attempts.
//! [`SinkObserver`] is the default: it reports every retried failure as a
//! progress line through an [`OutputSink`]. [`TracingObserver`] reports the
//! same events as structured `tracing` events.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::output::{OutputSink, StderrSink};

/// Prefix of the progress line written for a failed, retried attempt
pub const RETRY_FAILURE_PREFIX: &str = "Encountered an exception:";

/// Observer trait for retry attempt events
///
/// Errors are passed as `&dyn Debug` because the retry wrapper is generic over
/// the failure type and only requires it to be describable.
///
/// # Example
///
/// ```rust
/// use sdk_testing_core::retry::RetryObserver;
/// use std::fmt::Debug;
/// use std::time::Duration;
///
/// struct PrintObserver;
///
/// impl RetryObserver for PrintObserver {
///     fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
///         println!("attempt {attempt}/{max_attempts}");
///     }
///
///     fn on_attempt_failed(&self, attempt: u32, error: &dyn Debug, delay: Duration) {
///         println!("attempt {attempt} failed: {error:?}, retrying in {delay:?}");
///     }
///
///     fn on_success(&self, _attempt: u32, _total_duration: Duration) {}
///
///     fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Debug) {}
/// }
/// ```
pub trait RetryObserver: Send + Sync {
    /// Called when an attempt is about to start
    ///
    /// # Arguments
    ///
    /// * `attempt` - The attempt number (1-indexed)
    /// * `max_attempts` - The maximum number of attempts configured
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32);

    /// Called when an attempt fails and will be retried
    ///
    /// Never called for the final attempt.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The attempt number that failed (1-indexed)
    /// * `error` - The error that caused the failure
    /// * `delay` - The delay before the next attempt
    fn on_attempt_failed(&self, attempt: u32, error: &dyn Debug, delay: Duration);

    /// Called when the operation succeeds
    fn on_success(&self, attempt: u32, total_duration: Duration);

    /// Called when the final attempt fails and its error is handed back
    fn on_exhausted(&self, attempts: u32, final_error: &dyn Debug);
}

/// A no-op observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RetryObserver for NoOpObserver {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}

    fn on_attempt_failed(&self, _attempt: u32, _error: &dyn Debug, _delay: Duration) {}

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {}

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Debug) {}
}

/// Reports retried failures as progress lines through an [`OutputSink`]
///
/// Each failed attempt that will be retried produces exactly one line:
/// `Encountered an exception: <debug description of the error>`. Nothing is
/// written for successes or for the final failure.
///
/// A sink write failure is reported through `tracing` and does not interrupt
/// the retry loop.
#[derive(Debug, Clone, Default)]
pub struct SinkObserver<S = StderrSink> {
    sink: S,
}

impl SinkObserver<StderrSink> {
    /// Observer writing to standard error
    pub fn stderr() -> Self {
        Self { sink: StderrSink }
    }
}

impl<S: OutputSink> SinkObserver<S> {
    /// Observer writing to the given sink
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// The underlying sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: OutputSink> RetryObserver for SinkObserver<S> {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}

    fn on_attempt_failed(&self, attempt: u32, error: &dyn Debug, _delay: Duration) {
        let line = format!("{} {:?}", RETRY_FAILURE_PREFIX, error);
        if let Err(write_err) = self.sink.emit(&line) {
            tracing::warn!(
                attempt = attempt,
                error = %write_err,
                "failed to write retry progress line"
            );
        }
    }

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {}

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Debug) {}
}

/// An observer that logs retry events using the `tracing` crate
///
/// # Log Levels
///
/// - `on_attempt_start`: DEBUG
/// - `on_attempt_failed`: WARN
/// - `on_success`: INFO (if > 1 attempt) or DEBUG (first attempt)
/// - `on_exhausted`: DEBUG (the error is returned to the caller)
#[derive(Debug, Clone)]
pub struct TracingObserver {
    /// Name of the operation being retried (for log context)
    operation: String,
}

impl TracingObserver {
    /// Create a new tracing observer
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }

    /// Get the operation name
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("retry")
    }
}

impl RetryObserver for TracingObserver {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        tracing::debug!(
            operation = %self.operation,
            attempt = attempt,
            max_attempts = max_attempts,
            "starting attempt"
        );
    }

    fn on_attempt_failed(&self, attempt: u32, error: &dyn Debug, delay: Duration) {
        tracing::warn!(
            operation = %self.operation,
            attempt = attempt,
            error = ?error,
            delay_ms = delay.as_millis() as u64,
            "attempt failed, will retry"
        );
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        if attempt > 1 {
            tracing::info!(
                operation = %self.operation,
                attempt = attempt,
                total_duration_ms = total_duration.as_millis() as u64,
                "succeeded after retry"
            );
        } else {
            tracing::debug!(
                operation = %self.operation,
                duration_ms = total_duration.as_millis() as u64,
                "succeeded on first attempt"
            );
        }
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn Debug) {
        tracing::debug!(
            operation = %self.operation,
            attempts = attempts,
            error = ?final_error,
            "all attempts failed"
        );
    }
}

/// An observer that counts retry events
///
/// Useful for testing.
#[derive(Debug, Default)]
pub struct StatsObserver {
    attempt_starts: AtomicU32,
    failures: AtomicU32,
    successes: AtomicU32,
    exhaustions: AtomicU32,
}

impl StatsObserver {
    /// Create a new stats observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of attempt starts
    pub fn attempt_starts(&self) -> u32 {
        self.attempt_starts.load(Ordering::SeqCst)
    }

    /// Get the number of retried failures
    pub fn failures(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }

    /// Get the number of successes
    pub fn successes(&self) -> u32 {
        self.successes.load(Ordering::SeqCst)
    }

    /// Get the number of exhaustions
    pub fn exhaustions(&self) -> u32 {
        self.exhaustions.load(Ordering::SeqCst)
    }
}

impl RetryObserver for StatsObserver {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {
        self.attempt_starts.fetch_add(1, Ordering::SeqCst);
    }

    fn on_attempt_failed(&self, _attempt: u32, _error: &dyn Debug, _delay: Duration) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Debug) {
        self.exhaustions.fetch_add(1, Ordering::SeqCst);
    }
}

/// Fan events out to two observers, in order
impl<A: RetryObserver, B: RetryObserver> RetryObserver for (A, B) {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        self.0.on_attempt_start(attempt, max_attempts);
        self.1.on_attempt_start(attempt, max_attempts);
    }

    fn on_attempt_failed(&self, attempt: u32, error: &dyn Debug, delay: Duration) {
        self.0.on_attempt_failed(attempt, error, delay);
        self.1.on_attempt_failed(attempt, error, delay);
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        self.0.on_success(attempt, total_duration);
        self.1.on_success(attempt, total_duration);
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn Debug) {
        self.0.on_exhausted(attempts, final_error);
        self.1.on_exhausted(attempts, final_error);
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for std::sync::Arc<T> {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        (**self).on_attempt_start(attempt, max_attempts)
    }

    fn on_attempt_failed(&self, attempt: u32, error: &dyn Debug, delay: Duration) {
        (**self).on_attempt_failed(attempt, error, delay)
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        (**self).on_success(attempt, total_duration)
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn Debug) {
        (**self).on_exhausted(attempts, final_error)
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for Box<T> {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        (**self).on_attempt_start(attempt, max_attempts)
    }

    fn on_attempt_failed(&self, attempt: u32, error: &dyn Debug, delay: Duration) {
        (**self).on_attempt_failed(attempt, error, delay)
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        (**self).on_success(attempt, total_duration)
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn Debug) {
        (**self).on_exhausted(attempts, final_error)
    }
}
