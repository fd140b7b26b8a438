//! Common test infrastructure for agora-store tests
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

// Allow unused helpers - not every test binary uses every piece
#![allow(dead_code)]

pub mod builders;
pub mod mock_server;

pub use builders::*;
pub use mock_server::*;

use agora_client::MemoryTokenStore;
use agora_core::config::AgoraConfig;
use agora_core::notify::Notifier;
use agora_core::types::{PollPolicy, RetryPolicy, RetryStrategy, RuntimeConfig};
use agora_store::{AutoConfirm, Market};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

/// Notifier capturing all messages for assertions
#[derive(Default)]
pub struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// A wired market plus the notifier it reports through
pub struct TestContext {
    pub market: Market,
    pub notifier: Arc<RecordingNotifier>,
}

/// Install a test subscriber once so `RUST_LOG=debug` surfaces workflow
/// traces during test runs
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Wire a market against two mock servers with test-friendly timings
///
/// The token secret is mounted as missing so store requests run
/// anonymously; polling uses a 25 ms delay to keep tests fast while still
/// asserting the fixed-budget protocol.
pub async fn test_market(console: &MockServer, store: &MockServer, approve: bool) -> TestContext {
    init_tracing();
    mount_missing_token(console).await;

    let mut runtime = RuntimeConfig::default();
    runtime.store.base_url = store.uri();
    runtime.poll = PollPolicy {
        max_attempts: 5,
        delay_ms: 25,
    };
    runtime.retry_policies.binding = RetryPolicy {
        max_attempts: 3,
        strategy: RetryStrategy::FixedDelay,
        backoff_multiplier: 1.0,
        initial_delay_ms: 5,
        max_delay_ms: 5,
    };

    let config = AgoraConfig {
        runtime,
        config_path: None,
    };

    let notifier = Arc::new(RecordingNotifier::default());
    let market = Market::new(
        &console.uri(),
        &config,
        notifier.clone(),
        Arc::new(AutoConfirm(approve)),
        Arc::new(MemoryTokenStore::new()),
    )
    .unwrap();

    TestContext { market, notifier }
}
