//! Retry execution engine

use std::fmt;
use std::future::Future;
use std::time::Instant;

use crate::types::RetryPolicy;

use super::cancel::CancelToken;
use super::error::RetryError;
use super::observer::{NoOpObserver, RetryObserver};
use super::strategies::{calculate_delay, AlwaysRetry, RetryPredicate};

/// Execute an async operation with retry logic based on a policy
///
/// Convenience wrapper around [`RetryExecutor`] with defaults: retry every
/// error, no observer, jitter enabled.
pub async fn retry_with_policy<F, Fut, T, E>(
    policy: &RetryPolicy,
    op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display + Send + 'static,
{
    RetryExecutor::new(policy.clone()).execute(op).await
}

/// A retry executor with configurable policy, predicate, observer, and
/// cancellation token
///
/// ```rust,no_run
/// use agora_core::retry::{RetryExecutor, TracingObserver};
/// use agora_core::types::RetryPolicy;
///
/// let executor = RetryExecutor::new(RetryPolicy::fixed(5, 1000))
///     .with_observer(TracingObserver::new("confirm-upgrade"))
///     .with_jitter(false);
/// ```
pub struct RetryExecutor<P = AlwaysRetry, O = NoOpObserver> {
    policy: RetryPolicy,
    predicate: P,
    observer: O,
    jitter: bool,
    cancel: Option<CancelToken>,
}

impl RetryExecutor {
    /// Create an executor with default predicate and observer
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            predicate: AlwaysRetry,
            observer: NoOpObserver,
            jitter: true,
            cancel: None,
        }
    }
}

impl<P, O> RetryExecutor<P, O> {
    /// Set the retryability predicate
    pub fn with_predicate<P2>(self, predicate: P2) -> RetryExecutor<P2, O> {
        RetryExecutor {
            policy: self.policy,
            predicate,
            observer: self.observer,
            jitter: self.jitter,
            cancel: self.cancel,
        }
    }

    /// Set the observer
    pub fn with_observer<O2>(self, observer: O2) -> RetryExecutor<P, O2> {
        RetryExecutor {
            policy: self.policy,
            predicate: self.predicate,
            observer,
            jitter: self.jitter,
            cancel: self.cancel,
        }
    }

    /// Enable or disable jitter (enabled by default)
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Attach a cancellation token observed between and during attempts
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl<P, O> RetryExecutor<P, O>
where
    O: RetryObserver,
{
    /// Execute an operation with retry logic
    ///
    /// Returns the first successful result, or a [`RetryError`] describing
    /// why the loop stopped: predicate rejection, cancellation, or an
    /// exhausted attempt budget.
    pub async fn execute<F, Fut, T, E>(&self, mut op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display + Send + 'static,
        P: RetryPredicate<E>,
    {
        let start = Instant::now();
        let mut cancel = self.cancel.clone();

        for attempt in 1..=self.policy.max_attempts {
            if cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                self.observer.on_stopped(attempt - 1, None);
                return Err(RetryError::cancelled(attempt - 1, None));
            }

            self.observer
                .on_attempt_start(attempt, self.policy.max_attempts);

            let outcome = match cancel.as_mut() {
                Some(token) => {
                    tokio::select! {
                        _ = token.cancelled() => {
                            self.observer.on_stopped(attempt - 1, None);
                            return Err(RetryError::cancelled(attempt - 1, None));
                        }
                        outcome = op() => outcome,
                    }
                }
                None => op().await,
            };

            match outcome {
                Ok(result) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok(result);
                }
                Err(err) => {
                    if !self.predicate.should_retry(&err) {
                        self.observer
                            .on_stopped(attempt, Some(&err as &dyn fmt::Display));
                        return Err(RetryError::non_retryable(err));
                    }

                    if attempt >= self.policy.max_attempts {
                        self.observer.on_exhausted(attempt, &err);
                        return Err(RetryError::exhausted(attempt, err, start.elapsed()));
                    }

                    let delay = calculate_delay(&self.policy, attempt, self.jitter);
                    self.observer.on_attempt_failed(attempt, &err, delay);

                    if !delay.is_zero() {
                        match cancel.as_mut() {
                            Some(token) => {
                                tokio::select! {
                                    _ = token.cancelled() => {
                                        self.observer.on_stopped(attempt, None);
                                        return Err(RetryError::cancelled(attempt, Some(err)));
                                    }
                                    _ = tokio::time::sleep(delay) => {}
                                }
                            }
                            None => tokio::time::sleep(delay).await,
                        }
                    }
                }
            }
        }

        // Only reachable with max_attempts == 0
        Err(RetryError::cancelled(0, None))
    }
}
