//! Host runtime version cache
//!
//! The host version is the compatibility baseline for every listing on
//! screen, so it is fetched once and shared with a short staleness window
//! rather than re-read per evaluation.

use agora_client::ConsoleClient;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Process-wide cache of the host runtime version
pub struct HostVersion {
    console: Arc<ConsoleClient>,
    ttl: Duration,
    cached: Mutex<Option<CachedValue>>,
}

struct CachedValue {
    fetched_at: Instant,
    value: Option<String>,
}

impl HostVersion {
    /// Create a cache with the given staleness window
    pub fn new(console: Arc<ConsoleClient>, ttl_ms: u64) -> Self {
        Self {
            console,
            ttl: Duration::from_millis(ttl_ms),
            cached: Mutex::new(None),
        }
    }

    /// The host version, refreshed once the staleness window passes
    ///
    /// A fetch failure yields `None` without poisoning the cache; the next
    /// read retries.
    pub async fn get(&self) -> Option<String> {
        {
            let cached = self.cached.lock().unwrap();
            if let Some(entry) = cached.as_ref() {
                if entry.fetched_at.elapsed() < self.ttl {
                    return entry.value.clone();
                }
            }
        }

        match self.console.host_version().await {
            Ok(value) => {
                *self.cached.lock().unwrap() = Some(CachedValue {
                    fetched_at: Instant::now(),
                    value: value.clone(),
                });
                value
            }
            Err(err) => {
                debug!(%err, "host version fetch failed");
                None
            }
        }
    }

    /// Drop the cached value
    pub fn invalidate(&self) {
        *self.cached.lock().unwrap() = None;
    }
}
