//! Agora store API facade
//!
//! Read-only client for the remote marketplace. Requests attach
//! `Authorization: Bearer <token>` when the token cache holds a real
//! token; anonymous access works for public listings.

use crate::console::ConsoleClient;
use crate::error::ApiError;
use crate::token::{TokenCache, TokenStore};
use agora_core::types::{
    ApplicationDetail, ApplicationSearchResult, ExtensionKind, ListResponse, NetworkConfig,
    StoreConfig,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

const STORE_API_GROUP: &str = "apis/api.store.agora.dev/v1alpha1";

/// The signed-in store account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreUser {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of the resolve-download endpoint (presigned-URL indirection)
#[derive(Debug, Clone, Deserialize)]
struct DownloadTarget {
    url: Option<String>,
}

/// Client for the remote store API
pub struct StoreClient {
    http: reqwest::Client,
    base_url: Url,
    token: TokenCache,
    console: Arc<ConsoleClient>,
}

impl StoreClient {
    /// Create a client against the configured store backend
    ///
    /// The console client resolves the personal-access-token secret; the
    /// token store persists the resolved state.
    pub fn new(
        store: &StoreConfig,
        network: &NetworkConfig,
        console: Arc<ConsoleClient>,
        token_store: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.http_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(&store.base_url)?,
            token: TokenCache::new(token_store, store.token_secret.clone()),
            console,
        })
    }

    /// The token cache, for explicit invalidation
    pub fn token_cache(&self) -> &TokenCache {
        &self.token
    }

    /// List applications of a kind, optionally scoped to specific ids
    ///
    /// The `names` filter is serialized in repeated-key form
    /// (`names=a&names=b`), which is what the store expects for array
    /// parameters.
    pub async fn list_applications(
        &self,
        kind: ExtensionKind,
        names: &[String],
    ) -> Result<ListResponse<ApplicationSearchResult>, ApiError> {
        let mut query: Vec<(&str, &str)> = vec![("type", Self::type_param(kind))];
        query.extend(names.iter().map(|name| ("names", name.as_str())));

        self.get_json(
            format!("{}/applications", self.api_base()),
            &query,
        )
        .await
    }

    /// Fetch the full application detail by name
    pub async fn get_application(&self, name: &str) -> Result<ApplicationDetail, ApiError> {
        self.get_json(format!("{}/applications/{}", self.api_base(), name), &[])
            .await
    }

    /// Resolve a release asset to its downloadable URL
    ///
    /// The store answers with a JSON object carrying the (typically
    /// presigned) `url` rather than serving the bytes directly.
    pub async fn resolve_download_url(
        &self,
        app_name: &str,
        release_name: &str,
        asset_name: &str,
    ) -> Result<String, ApiError> {
        let target: DownloadTarget = self
            .get_json(
                format!(
                    "{}/applications/{}/releases/{}/download/{}",
                    self.api_base(),
                    app_name,
                    release_name,
                    asset_name
                ),
                &[],
            )
            .await?;

        let url = target.url.ok_or_else(|| ApiError::missing_field("url"))?;
        debug!(app = app_name, asset = asset_name, "download url resolved");
        Ok(url)
    }

    /// The signed-in store account
    pub async fn current_user(&self) -> Result<StoreUser, ApiError> {
        self.get_json(format!("{}/users/-", self.api_base()), &[])
            .await
    }

    /// Prefix a store-relative resource path (logo, screenshot) with the
    /// store base URL; absolute `http(s)` and `data:` URLs pass through
    pub fn prepend_store_domain(&self, path: &str) -> String {
        if path.starts_with("http") || path.starts_with("data") {
            return path.to_string();
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        if let Some(rest) = path.strip_prefix('/') {
            format!("{}/{}", base, rest)
        } else {
            format!("{}/{}", base, path)
        }
    }

    fn api_base(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            STORE_API_GROUP
        )
    }

    fn type_param(kind: ExtensionKind) -> &'static str {
        match kind {
            ExtensionKind::Plugin => "PLUGIN",
            ExtensionKind::Theme => "THEME",
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.token.resolve(&self.console).await? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                problem: response.json().await.ok(),
            });
        }

        response.json::<T>().await.map_err(ApiError::Transport)
    }
}
