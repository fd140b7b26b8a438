//! Retry delay strategies and retryability predicates

use crate::types::{RetryPolicy, RetryStrategy};
use rand::Rng;
use std::time::Duration;

/// Calculate the delay before the next retry attempt
///
/// `attempt` is 1-indexed. Jitter adds up to 25% random variation on top
/// of the capped base delay.
pub fn calculate_delay(policy: &RetryPolicy, attempt: u32, jitter: bool) -> Duration {
    let attempt_index = attempt.saturating_sub(1);

    let base_delay_ms = match policy.strategy {
        RetryStrategy::None => 0,

        RetryStrategy::FixedDelay => policy.initial_delay_ms,

        RetryStrategy::ExponentialBackoff => {
            let multiplier = policy.backoff_multiplier.powf(attempt_index as f64);
            (policy.initial_delay_ms as f64 * multiplier) as u64
        }

        RetryStrategy::LinearBackoff => policy.initial_delay_ms * (attempt_index as u64 + 1),
    };

    let capped_delay_ms = base_delay_ms.min(policy.max_delay_ms);

    let final_delay_ms = if jitter && capped_delay_ms > 0 {
        let jitter_range = capped_delay_ms / 4;
        capped_delay_ms + rand::rng().random_range(0..=jitter_range)
    } else {
        capped_delay_ms
    };

    Duration::from_millis(final_delay_ms)
}

/// A predicate that determines whether an error should be retried
///
/// The default is to retry everything; workflows hand in a predicate to
/// short-circuit on errors that further attempts cannot fix (a transport
/// failure during confirmation polling, a permanent HTTP status).
pub trait RetryPredicate<E: ?Sized>: Send + Sync {
    /// Determine whether the given error should be retried
    fn should_retry(&self, error: &E) -> bool;
}

/// A predicate that always returns true (all errors are retryable)
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRetry;

impl<E: ?Sized> RetryPredicate<E> for AlwaysRetry {
    fn should_retry(&self, _error: &E) -> bool {
        true
    }
}

/// A predicate that uses a closure to determine retryability
pub struct ClosurePredicate<F> {
    predicate: F,
}

impl<F> ClosurePredicate<F> {
    /// Create a new closure-based predicate
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<E, F> RetryPredicate<E> for ClosurePredicate<F>
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn should_retry(&self, error: &E) -> bool {
        (self.predicate)(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn policy(strategy: RetryStrategy) -> RetryPolicy {
        RetryPolicy {
            max_attempts: 5,
            strategy,
            backoff_multiplier: 2.0,
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
        }
    }

    #[test]
    fn none_strategy_never_waits() {
        let policy = policy(RetryStrategy::None);
        assert_eq!(calculate_delay(&policy, 1, false), Duration::ZERO);
        assert_eq!(calculate_delay(&policy, 3, false), Duration::ZERO);
    }

    #[test]
    fn fixed_strategy_is_constant() {
        let policy = policy(RetryStrategy::FixedDelay);
        for attempt in 1..=5 {
            assert_eq!(
                calculate_delay(&policy, attempt, false),
                Duration::from_millis(1000)
            );
        }
    }

    #[test]
    fn exponential_strategy_doubles() {
        let policy = policy(RetryStrategy::ExponentialBackoff);
        assert_eq!(
            calculate_delay(&policy, 1, false),
            Duration::from_millis(1000)
        );
        assert_eq!(
            calculate_delay(&policy, 2, false),
            Duration::from_millis(2000)
        );
        assert_eq!(
            calculate_delay(&policy, 3, false),
            Duration::from_millis(4000)
        );
    }

    #[test]
    fn linear_strategy_increments() {
        let policy = policy(RetryStrategy::LinearBackoff);
        assert_eq!(
            calculate_delay(&policy, 2, false),
            Duration::from_millis(2000)
        );
        assert_eq!(
            calculate_delay(&policy, 3, false),
            Duration::from_millis(3000)
        );
    }

    #[test]
    fn max_delay_caps_backoff() {
        let mut p = policy(RetryStrategy::ExponentialBackoff);
        p.max_delay_ms = 5000;
        assert_eq!(calculate_delay(&p, 5, false), Duration::from_millis(5000));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let policy = policy(RetryStrategy::FixedDelay);
        for _ in 0..100 {
            let delay = calculate_delay(&policy, 1, true);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(1250));
        }
    }

    #[test]
    fn closure_predicate_filters() {
        let predicate = ClosurePredicate::new(|err: &io::Error| {
            matches!(
                err.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
            )
        });

        let timeout = io::Error::new(io::ErrorKind::TimedOut, "timeout");
        let not_found = io::Error::new(io::ErrorKind::NotFound, "not found");

        assert!(predicate.should_retry(&timeout));
        assert!(!predicate.should_retry(&not_found));
    }
}
