//! Delay between attempts
//!
//! The blocking retry loop never calls `std::thread::sleep` directly; it goes
//! through a [`Sleeper`] so tests can observe delays without waiting them out.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Blocks the calling thread between attempts
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Records requested delays without waiting
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    calls: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delay requested so far
    pub fn calls(&self) -> Vec<Duration> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of delays requested so far
    pub fn count(&self) -> usize {
        self.calls().len()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(duration),
            Err(poisoned) => poisoned.into_inner().push(duration),
        }
    }
}

impl<T: Sleeper + ?Sized> Sleeper for Arc<T> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}
