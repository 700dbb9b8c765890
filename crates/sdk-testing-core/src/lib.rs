//! # sdk-testing-core
//!
//! Core helpers for integration tests that run against a live cluster:
//! - Progress output on standard error, behind an injectable sink
//! - Retry-with-sleep wrapper that hands back the operation's own error
//! - Layered configuration (embedded defaults, file, environment)

pub mod config;
pub mod error;
pub mod output;
pub mod retry;
pub mod types;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use output::out;
pub use retry::{try_throws_n_times, RetryInvoker};
pub use types::{RetryPolicy, TestingConfig};
