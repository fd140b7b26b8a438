//! Retry execution engine with policy-based configuration
//!
//! A reusable retry engine shared by the install/upgrade workflow: the
//! annotation-binding writes run on the default policy, and the
//! upgrade-confirmation poll runs on a fixed-delay policy with a
//! predicate that only retries version mismatches.
//!
//! # Features
//!
//! - Strategies: none, fixed delay, exponential and linear backoff
//! - Optional jitter for backoff strategies
//! - Retryability predicates to short-circuit on permanent errors
//! - Observable attempts via the `RetryObserver` trait
//! - Cooperative cancellation through a `CancelToken`
//!
//! # Example
//!
//! ```rust,no_run
//! use agora_core::retry::{retry_with_policy, RetryError};
//! use agora_core::types::RetryPolicy;
//!
//! async fn example() -> Result<String, RetryError<std::io::Error>> {
//!     let policy = RetryPolicy::default();
//!
//!     retry_with_policy(&policy, || async {
//!         // Your fallible operation here
//!         Ok("success".to_string())
//!     }).await
//! }
//! ```

mod cancel;
mod error;
mod executor;
mod observer;
mod strategies;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use error::RetryError;
pub use executor::{retry_with_policy, RetryExecutor};
pub use observer::{NoOpObserver, RetryObserver, StatsObserver, TracingObserver};
pub use strategies::{calculate_delay, AlwaysRetry, ClosurePredicate, RetryPredicate};
