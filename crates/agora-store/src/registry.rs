//! Installed-extension registry
//!
//! Caches the console's installed plugin/theme lists, filtered to
//! extensions carrying the store-origin annotation, keyed by kind with a
//! short staleness window so rapid repeated reads within a render cycle do
//! not refetch. Install and upgrade flows invalidate the affected kind
//! after their mutation resolves.
//!
//! Concurrent cache misses may fetch twice; both writers converge on
//! equivalent data, matching the token cache's tolerance for races.

use agora_client::{ApiError, ConsoleClient};
use agora_core::types::{Extension, ExtensionKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache of store-originated installed extensions, per kind
pub struct InstalledRegistry {
    console: Arc<ConsoleClient>,
    ttl: Duration,
    cache: Mutex<HashMap<ExtensionKind, CacheEntry>>,
}

struct CacheEntry {
    fetched_at: Instant,
    items: Arc<Vec<Extension>>,
}

impl InstalledRegistry {
    /// Create a registry with the given staleness window
    pub fn new(console: Arc<ConsoleClient>, ttl_ms: u64) -> Self {
        Self {
            console,
            ttl: Duration::from_millis(ttl_ms),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Installed extensions of `kind` carrying the store-origin annotation
    pub async fn installed(&self, kind: ExtensionKind) -> Result<Arc<Vec<Extension>>, ApiError> {
        {
            let cache = self.cache.lock().unwrap();
            if let Some(entry) = cache.get(&kind) {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(entry.items.clone());
                }
            }
        }

        let list = self.console.list_extensions(kind).await?;
        let items: Arc<Vec<Extension>> = Arc::new(
            list.items
                .into_iter()
                .filter(|extension| extension.store_app_id().is_some())
                .collect(),
        );

        debug!(kind = %kind, count = items.len(), "installed list refreshed");

        self.cache.lock().unwrap().insert(
            kind,
            CacheEntry {
                fetched_at: Instant::now(),
                items: items.clone(),
            },
        );

        Ok(items)
    }

    /// First installed extension bound to the given listing id
    ///
    /// Iteration order decides ties; duplicates are not deduplicated.
    pub async fn find_match(
        &self,
        kind: ExtensionKind,
        app_id: &str,
    ) -> Result<Option<Extension>, ApiError> {
        Ok(self
            .installed(kind)
            .await?
            .iter()
            .find(|extension| extension.store_app_id() == Some(app_id))
            .cloned())
    }

    /// Drop the cached list for one kind
    pub fn invalidate(&self, kind: ExtensionKind) {
        self.cache.lock().unwrap().remove(&kind);
    }

    /// Drop every cached list
    pub fn invalidate_all(&self) {
        self.cache.lock().unwrap().clear();
    }
}
