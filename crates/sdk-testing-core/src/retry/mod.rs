//! Retry-with-sleep wrapper for flaky test steps
//!
//! Integration tests against a live cluster routinely poll for state that
//! takes a while to converge. This module wraps such a step in a bounded
//! loop with a fixed delay between attempts.
//!
//! # Features
//!
//! - Generic over the operation's value and error types; the final error is
//!   returned unchanged
//! - No delay after the final attempt
//! - Retried failures reported on standard error (or any [`OutputSink`])
//! - Observable attempts via the `RetryObserver` trait
//! - Injectable `Sleeper` for tests, plus an async variant on tokio
//!
//! # Example
//!
//! ```rust,no_run
//! use sdk_testing_core::retry::try_throws_n_times;
//!
//! fn deployment_complete() -> Result<bool, std::io::Error> {
//!     // query the scheduler here
//!     Ok(true)
//! }
//!
//! let done = try_throws_n_times(deployment_complete, 10, 5.0).unwrap();
//! assert!(done);
//! ```
//!
//! [`OutputSink`]: crate::output::OutputSink

mod executor;
mod observer;
mod sleeper;

pub use executor::{try_throws_n_times, RetryInvoker};
pub use observer::{
    NoOpObserver, RetryObserver, SinkObserver, StatsObserver, TracingObserver,
    RETRY_FAILURE_PREFIX,
};
pub use sleeper::{RecordingSleeper, Sleeper, ThreadSleeper};
