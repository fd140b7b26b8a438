//! Compatibility evaluation between store listings and installed extensions
//!
//! Two directions:
//! - listing-centric ([`CompatibilityEvaluator::evaluate_listing`]) for
//!   store browsing screens: is this listing installed, is an update
//!   available, does the host satisfy its requirement range;
//! - extension-centric ([`CompatibilityEvaluator::evaluate_extension`]) for
//!   installed-list screens: each row looks up its own store counterpart
//!   through a scoped query over the ids of installed extensions.

use crate::error::Result;
use crate::host::HostVersion;
use crate::registry::InstalledRegistry;
use crate::version;
use agora_client::StoreClient;
use agora_core::types::{
    ApplicationSearchResult, CacheConfig, Extension, ExtensionKind,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Listing-centric evaluation result
#[derive(Debug, Clone)]
pub struct AppCompare {
    /// Declared kind of the listing
    pub kind: ExtensionKind,

    /// The installed extension bound to this listing, if any
    pub matched: Option<Extension>,

    /// Whether the latest release is newer than the matched extension
    pub has_update: bool,

    /// Whether the host runtime satisfies the latest release's range
    pub satisfies_host: bool,
}

impl AppCompare {
    /// Whether a bound installed extension exists
    pub fn has_installed(&self) -> bool {
        self.matched.is_some()
    }
}

/// Extension-centric evaluation result
#[derive(Debug, Clone)]
pub struct ExtensionCompare {
    /// The store listing this extension was installed from, if still listed
    pub matched_app: Option<ApplicationSearchResult>,

    /// Whether the listing's latest release is newer than this extension
    pub has_update: bool,

    /// Whether the host runtime satisfies the latest release's range
    pub satisfies_host: bool,
}

/// Matches listings against installed extensions and computes update and
/// compatibility state
pub struct CompatibilityEvaluator {
    store: Arc<StoreClient>,
    registry: Arc<InstalledRegistry>,
    host: Arc<HostVersion>,
    listings: Mutex<HashMap<ExtensionKind, ListingsEntry>>,
    listings_ttl: Duration,
}

struct ListingsEntry {
    fetched_at: Instant,
    items: Arc<Vec<ApplicationSearchResult>>,
}

impl CompatibilityEvaluator {
    /// Create an evaluator over the given services
    pub fn new(
        store: Arc<StoreClient>,
        registry: Arc<InstalledRegistry>,
        host: Arc<HostVersion>,
        cache: &CacheConfig,
    ) -> Self {
        Self {
            store,
            registry,
            host,
            listings: Mutex::new(HashMap::new()),
            listings_ttl: Duration::from_millis(cache.installed_ttl_ms),
        }
    }

    /// Evaluate a store listing against the installed extensions of its kind
    ///
    /// No match means not installed and no update, never an error. Update
    /// and compatibility both require a published latest release; the
    /// compatibility check additionally requires a known host version.
    pub async fn evaluate_listing(
        &self,
        listing: &ApplicationSearchResult,
    ) -> Result<AppCompare> {
        let kind = listing.kind();
        let matched = self.registry.find_match(kind, listing.app_id()).await?;

        let has_update = match (&matched, listing.latest_version()) {
            (Some(extension), Some(latest)) => {
                version::update_available(extension.version(), latest)
            }
            _ => false,
        };

        let satisfies_host = match &listing.latest_release {
            None => false,
            Some(release) => match self.host.get().await {
                None => false,
                Some(host) => {
                    version::satisfies_requires(Some(&host), release.spec.requires.as_deref())
                }
            },
        };

        Ok(AppCompare {
            kind,
            matched,
            has_update,
            satisfies_host,
        })
    }

    /// Evaluate an installed extension against its store counterpart
    ///
    /// Unbound extensions (no store-origin annotation) short-circuit to
    /// "no counterpart" without touching the store.
    pub async fn evaluate_extension(
        &self,
        kind: ExtensionKind,
        extension: &Extension,
    ) -> Result<ExtensionCompare> {
        let Some(app_id) = extension.store_app_id() else {
            return Ok(ExtensionCompare {
                matched_app: None,
                has_update: false,
                satisfies_host: false,
            });
        };

        let listings = self.store_listings(kind).await?;
        let matched_app = listings
            .iter()
            .find(|listing| listing.app_id() == app_id)
            .cloned();

        let Some(app) = &matched_app else {
            return Ok(ExtensionCompare {
                matched_app: None,
                has_update: false,
                satisfies_host: false,
            });
        };

        let has_update = app
            .latest_version()
            .map(|latest| version::update_available(extension.version(), latest))
            .unwrap_or(false);

        let satisfies_host = match &app.latest_release {
            None => false,
            Some(release) => match self.host.get().await {
                None => false,
                Some(host) => {
                    version::satisfies_requires(Some(&host), release.spec.requires.as_deref())
                }
            },
        };

        Ok(ExtensionCompare {
            matched_app,
            has_update,
            satisfies_host,
        })
    }

    /// Drop the cached scoped listings for one kind
    pub fn invalidate(&self, kind: ExtensionKind) {
        self.listings.lock().unwrap().remove(&kind);
    }

    /// Store listings scoped to the ids of installed extensions
    ///
    /// Fetched only when at least one installed extension carries the
    /// store-origin annotation, and cached briefly so that a list screen
    /// evaluating every row issues one query, not one per row.
    async fn store_listings(
        &self,
        kind: ExtensionKind,
    ) -> Result<Arc<Vec<ApplicationSearchResult>>> {
        {
            let listings = self.listings.lock().unwrap();
            if let Some(entry) = listings.get(&kind) {
                if entry.fetched_at.elapsed() < self.listings_ttl {
                    return Ok(entry.items.clone());
                }
            }
        }

        let installed = self.registry.installed(kind).await?;
        if installed.is_empty() {
            return Ok(Arc::new(Vec::new()));
        }

        let ids: Vec<String> = installed
            .iter()
            .filter_map(|extension| extension.store_app_id().map(str::to_string))
            .collect();

        let list = self.store.list_applications(kind, &ids).await?;
        let items = Arc::new(list.items);

        self.listings.lock().unwrap().insert(
            kind,
            ListingsEntry {
                fetched_at: Instant::now(),
                items: items.clone(),
            },
        );

        Ok(items)
    }
}
