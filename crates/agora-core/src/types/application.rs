//! Store listing wire types
//!
//! Read-only models of the marketplace resources: applications, releases,
//! and release assets. List endpoints return [`ApplicationSearchResult`]
//! items (release without assets); the single-item endpoint returns the
//! richer [`ApplicationDetail`] with downloadable assets.

use super::extension::{ExtensionKind, Metadata};
use serde::{Deserialize, Serialize};

/// A marketplace listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub metadata: Metadata,
    pub spec: ApplicationSpec,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationSpec {
    pub display_name: String,

    /// Declared listing type; drives which installed list is consulted
    #[serde(rename = "type")]
    pub kind: ExtensionKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_config: Option<PriceConfig>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for ApplicationSpec {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            kind: ExtensionKind::Plugin,
            price_config: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Pricing declaration of a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceConfig {
    pub mode: PriceMode,

    /// Price in cents, meaningful for one-time purchases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_time_price: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceMode {
    #[default]
    Free,
    OneTime,
}

/// A published release of an application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationRelease {
    pub metadata: Metadata,
    pub spec: ReleaseSpec,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseSpec {
    pub display_name: String,

    /// Semver of the packaged artifact; absent on drafts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Host compatibility range; absent means "any host version"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A downloadable artifact attached to a release
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseAsset {
    pub metadata: Metadata,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Release plus its assets, as returned by the single-item endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseDetail {
    pub release: ApplicationRelease,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<ReleaseAsset>>,
}

/// A list-endpoint item: listing plus its latest release reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationSearchResult {
    pub application: Application,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_release: Option<ApplicationRelease>,
}

impl ApplicationSearchResult {
    /// The listing's resource name (the store-side identity)
    pub fn app_id(&self) -> &str {
        &self.application.metadata.name
    }

    /// Declared kind of the listing
    pub fn kind(&self) -> ExtensionKind {
        self.application.spec.kind
    }

    /// Version of the latest release, if published
    pub fn latest_version(&self) -> Option<&str> {
        self.latest_release
            .as_ref()
            .and_then(|r| r.spec.version.as_deref())
    }
}

/// The single-item fetch: listing plus full latest-release detail
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDetail {
    pub application: Application,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_release: Option<ReleaseDetail>,
}

/// Paged list envelope used by both console and store list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListResponse<T> {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            page: 0,
            size: 0,
            total: 0,
            items: Vec::new(),
        }
    }
}

impl<T> ListResponse<T> {
    /// Wrap a full result set without pagination
    pub fn of(items: Vec<T>) -> Self {
        Self {
            total: items.len() as u64,
            items,
            ..Self::default()
        }
    }
}
