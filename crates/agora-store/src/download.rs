//! Download resolution for store listings
//!
//! Turns a listing into a concrete downloadable asset URL, reporting the
//! user-facing rejection reason at each short-circuit. Read-only and
//! idempotent; callers may retry freely.

use crate::error::Result;
use agora_client::StoreClient;
use agora_core::notify::Notifier;
use agora_core::types::ApplicationSearchResult;
use std::sync::Arc;
use tracing::debug;

/// Resolves a listing's latest release to its downloadable asset URL
pub struct DownloadResolver {
    store: Arc<StoreClient>,
    notifier: Arc<dyn Notifier>,
}

impl DownloadResolver {
    pub fn new(store: Arc<StoreClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Resolve the download URL for the listing's latest release
    ///
    /// `Ok(None)` means the listing is not installable right now; the
    /// reason has already been reported. The first asset of the latest
    /// release is the canonical artifact. Transport failures propagate.
    pub async fn resolve(
        &self,
        listing: Option<&ApplicationSearchResult>,
    ) -> Result<Option<String>> {
        let Some(listing) = listing else {
            self.notifier.error("Application does not exist");
            return Ok(None);
        };

        if listing.latest_release.is_none() {
            self.notifier.error("This application has no published release");
            return Ok(None);
        }

        let detail = self.store.get_application(listing.app_id()).await?;

        let asset = detail
            .latest_release
            .as_ref()
            .and_then(|release| release.assets.as_ref())
            .and_then(|assets| assets.first());

        let (release, asset) = match (detail.latest_release.as_ref(), asset) {
            (Some(release), Some(asset)) => (release, asset),
            _ => {
                self.notifier
                    .error("The latest release has no installable asset");
                return Ok(None);
            }
        };

        let url = self
            .store
            .resolve_download_url(
                listing.app_id(),
                &release.release.metadata.name,
                &asset.metadata.name,
            )
            .await?;

        debug!(app = listing.app_id(), url = %url, "download resolved");
        Ok(Some(url))
    }
}
