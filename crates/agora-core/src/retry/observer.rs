//! Retry observation and logging

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Observer trait for retry attempt events
///
/// Implement this to receive callbacks during retry execution, for
/// logging, metrics collection, or test assertions.
pub trait RetryObserver: Send + Sync {
    /// Called when an attempt is about to start (1-indexed)
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32);

    /// Called when an attempt fails and will be retried after `delay`
    fn on_attempt_failed(&self, attempt: u32, error: &dyn fmt::Display, delay: Duration);

    /// Called when the operation succeeds
    fn on_success(&self, attempt: u32, total_duration: Duration);

    /// Called when all retry attempts are exhausted
    fn on_exhausted(&self, attempts: u32, final_error: &dyn fmt::Display);

    /// Called when the loop stops early: predicate rejection or cancellation
    fn on_stopped(&self, attempt: u32, error: Option<&dyn fmt::Display>) {
        let _ = (attempt, error);
    }
}

/// A no-op observer
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RetryObserver for NoOpObserver {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}

    fn on_attempt_failed(&self, _attempt: u32, _error: &dyn fmt::Display, _delay: Duration) {}

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {}

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn fmt::Display) {}
}

/// An observer that logs through `tracing`, tagged with an operation name
#[derive(Debug, Clone)]
pub struct TracingObserver {
    operation: String,
}

impl TracingObserver {
    /// Create an observer for the named operation
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }
}

impl RetryObserver for TracingObserver {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        debug!(
            operation = %self.operation,
            attempt,
            max_attempts,
            "starting attempt"
        );
    }

    fn on_attempt_failed(&self, attempt: u32, error: &dyn fmt::Display, delay: Duration) {
        warn!(
            operation = %self.operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            %error,
            "attempt failed, retrying"
        );
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        debug!(
            operation = %self.operation,
            attempt,
            elapsed_ms = total_duration.as_millis() as u64,
            "succeeded"
        );
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn fmt::Display) {
        error!(
            operation = %self.operation,
            attempts,
            error = %final_error,
            "retries exhausted"
        );
    }

    fn on_stopped(&self, attempt: u32, error: Option<&dyn fmt::Display>) {
        match error {
            Some(error) => debug!(
                operation = %self.operation,
                attempt,
                %error,
                "retry stopped"
            ),
            None => debug!(operation = %self.operation, attempt, "retry stopped"),
        }
    }
}

/// An observer that counts events, for tests
#[derive(Debug, Default)]
pub struct StatsObserver {
    attempt_starts: AtomicU32,
    failures: AtomicU32,
    successes: AtomicU32,
    exhaustions: AtomicU32,
    stops: AtomicU32,
}

impl StatsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempt_starts(&self) -> u32 {
        self.attempt_starts.load(Ordering::SeqCst)
    }

    pub fn failures(&self) -> u32 {
        self.failures.load(Ordering::SeqCst)
    }

    pub fn successes(&self) -> u32 {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn exhaustions(&self) -> u32 {
        self.exhaustions.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> u32 {
        self.stops.load(Ordering::SeqCst)
    }
}

impl RetryObserver for StatsObserver {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {
        self.attempt_starts.fetch_add(1, Ordering::SeqCst);
    }

    fn on_attempt_failed(&self, _attempt: u32, _error: &dyn fmt::Display, _delay: Duration) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn fmt::Display) {
        self.exhaustions.fetch_add(1, Ordering::SeqCst);
    }

    fn on_stopped(&self, _attempt: u32, _error: Option<&dyn fmt::Display>) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for std::sync::Arc<T> {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        (**self).on_attempt_start(attempt, max_attempts);
    }

    fn on_attempt_failed(&self, attempt: u32, error: &dyn fmt::Display, delay: Duration) {
        (**self).on_attempt_failed(attempt, error, delay);
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        (**self).on_success(attempt, total_duration);
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn fmt::Display) {
        (**self).on_exhausted(attempts, final_error);
    }

    fn on_stopped(&self, attempt: u32, error: Option<&dyn fmt::Display>) {
        (**self).on_stopped(attempt, error);
    }
}
