//! Host console API facade
//!
//! Covers the console endpoints this integration needs: installed
//! plugin/theme lists, single-item fetches, install/upgrade-from-URI,
//! annotation write-backs, secret reads, and the runtime version.
//!
//! Every call funnels through [`ConsoleClient::send`], which mirrors the
//! console's global error interceptor: failures are reported through the
//! [`Notifier`] unless the call is muted. Muted calls are the expected-
//! failure paths (confirmation polling, annotation binding, secret probes)
//! whose errors are handled by the caller.

use crate::error::ApiError;
use crate::problem::ProblemDetail;
use agora_core::notify::Notifier;
use agora_core::types::{Extension, ExtensionKind, ListResponse, Metadata, NetworkConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

const CONSOLE_API_GROUP: &str = "apis/api.console.lumen.dev/v1alpha1";
const PLUGIN_API_GROUP: &str = "apis/plugin.lumen.dev/v1alpha1";
const THEME_API_GROUP: &str = "apis/theme.lumen.dev/v1alpha1";
const SECRET_API_GROUP: &str = "apis/v1alpha1";

/// Request body for the install/upgrade-from-URI endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FromUriRequest {
    pub uri: String,
}

/// Console secret resource; only the string data is read here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Secret {
    pub metadata: Metadata,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_data: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ActuatorInfo {
    build: Option<BuildInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BuildInfo {
    version: Option<String>,
}

/// Client for the host console API
pub struct ConsoleClient {
    http: reqwest::Client,
    base_url: Url,
    notifier: Arc<dyn Notifier>,
}

impl ConsoleClient {
    /// Create a client against the console at `base_url`
    pub fn new(
        base_url: &str,
        network: &NetworkConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.http_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            notifier,
        })
    }

    /// List installed extensions of the given kind
    ///
    /// Theme listing excludes uninstalled entries, matching the console UI.
    pub async fn list_extensions(
        &self,
        kind: ExtensionKind,
    ) -> Result<ListResponse<Extension>, ApiError> {
        let path = format!("{}/{}", CONSOLE_API_GROUP, Self::collection(kind));
        let mut request = self.http.get(self.endpoint(&path));
        if kind == ExtensionKind::Theme {
            request = request.query(&[("uninstalled", "false")]);
        }
        self.send(request, false).await
    }

    /// Fetch a single extension by name
    pub async fn get_extension(
        &self,
        kind: ExtensionKind,
        name: &str,
    ) -> Result<Extension, ApiError> {
        self.send(self.http.get(self.endpoint(&Self::resource_path(kind, name))), false)
            .await
    }

    /// Fetch a single extension by name without reporting failures
    pub async fn get_extension_quiet(
        &self,
        kind: ExtensionKind,
        name: &str,
    ) -> Result<Extension, ApiError> {
        self.send(self.http.get(self.endpoint(&Self::resource_path(kind, name))), true)
            .await
    }

    /// Install an extension from a downloadable URI
    pub async fn install_from_uri(
        &self,
        kind: ExtensionKind,
        uri: &str,
    ) -> Result<Extension, ApiError> {
        let path = format!(
            "{}/{}/install-from-uri",
            CONSOLE_API_GROUP,
            Self::collection(kind)
        );
        debug!(kind = %kind, uri, "installing from uri");
        let request = self.http.post(self.endpoint(&path)).json(&FromUriRequest {
            uri: uri.to_string(),
        });
        self.send(request, false).await
    }

    /// Upgrade the named extension from a downloadable URI
    pub async fn upgrade_from_uri(
        &self,
        kind: ExtensionKind,
        name: &str,
        uri: &str,
    ) -> Result<Extension, ApiError> {
        let path = format!(
            "{}/{}/{}/upgrade-from-uri",
            CONSOLE_API_GROUP,
            Self::collection(kind),
            name
        );
        debug!(kind = %kind, name, uri, "upgrading from uri");
        let request = self.http.post(self.endpoint(&path)).json(&FromUriRequest {
            uri: uri.to_string(),
        });
        self.send(request, false).await
    }

    /// Write back a modified extension (annotation merges)
    ///
    /// Always muted: binding runs on a retry policy and surfaces its own
    /// outcome.
    pub async fn update_extension_quiet(
        &self,
        kind: ExtensionKind,
        extension: &Extension,
    ) -> Result<Extension, ApiError> {
        let path = Self::resource_path(kind, extension.name());
        let request = self.http.put(self.endpoint(&path)).json(extension);
        self.send(request, true).await
    }

    /// Fetch a secret without reporting failures (absence is expected)
    pub async fn get_secret_quiet(&self, name: &str) -> Result<Secret, ApiError> {
        let path = format!("{}/secrets/{}", SECRET_API_GROUP, name);
        self.send(self.http.get(self.endpoint(&path)), true).await
    }

    /// The host runtime version from the actuator endpoint
    pub async fn host_version(&self) -> Result<Option<String>, ApiError> {
        let info: ActuatorInfo = self
            .send(self.http.get(self.endpoint("actuator/info")), true)
            .await?;
        Ok(info.build.and_then(|b| b.version))
    }

    fn collection(kind: ExtensionKind) -> &'static str {
        match kind {
            ExtensionKind::Plugin => "plugins",
            ExtensionKind::Theme => "themes",
        }
    }

    fn resource_path(kind: ExtensionKind, name: &str) -> String {
        match kind {
            ExtensionKind::Plugin => format!("{}/plugins/{}", PLUGIN_API_GROUP, name),
            ExtensionKind::Theme => format!("{}/themes/{}", THEME_API_GROUP, name),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        mute: bool,
    ) -> Result<T, ApiError> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                if !mute {
                    self.notifier.error("Network error, check the connection");
                }
                return Err(ApiError::Transport(err));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let problem = response.json::<ProblemDetail>().await.ok();
            let err = ApiError::Status {
                status: status.as_u16(),
                problem,
            };
            if !mute {
                self.report(&err);
            }
            return Err(err);
        }

        response.json::<T>().await.map_err(ApiError::Transport)
    }

    fn report(&self, err: &ApiError) {
        if err.status() == Some(401) {
            self.notifier.warning("Session expired, sign in again");
            return;
        }

        match err.problem().and_then(|p| p.message()) {
            Some(message) => self.notifier.error(message),
            None => self.notifier.error("Unknown error"),
        }
    }
}
