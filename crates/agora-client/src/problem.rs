//! RFC 7807 problem-detail responses from the console API
//!
//! Failed install calls carry a `type` URI discriminator; the two
//! already-exists types additionally carry the conflicting resource's name,
//! which the orchestrator needs to route into the forced-reinstall path.

use agora_core::types::ExtensionKind;
use serde::{Deserialize, Serialize};

/// Problem type signalling that a plugin with the same name is installed
pub const PLUGIN_ALREADY_EXISTS_TYPE: &str = "https://lumen.dev/probs/plugin-already-exists";

/// Problem type signalling that a theme with the same name is installed
pub const THEME_ALREADY_EXISTS_TYPE: &str = "https://lumen.dev/probs/theme-already-exists";

/// Structured error body returned by the console API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemDetail {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Set by the plugin-already-exists problem type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,

    /// Set by the theme-already-exists problem type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_name: Option<String>,
}

/// An already-exists conflict extracted from a problem detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ExtensionKind,
    /// Name of the extension that already occupies the identity
    pub name: String,
}

impl ProblemDetail {
    /// Extract the already-exists conflict, if this problem is one
    pub fn conflict(&self) -> Option<Conflict> {
        match self.type_uri.as_deref() {
            Some(PLUGIN_ALREADY_EXISTS_TYPE) => self.plugin_name.clone().map(|name| Conflict {
                kind: ExtensionKind::Plugin,
                name,
            }),
            Some(THEME_ALREADY_EXISTS_TYPE) => self.theme_name.clone().map(|name| Conflict {
                kind: ExtensionKind::Theme,
                name,
            }),
            _ => None,
        }
    }

    /// User-facing message: detail when present, else title
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.title.as_deref())
    }
}
