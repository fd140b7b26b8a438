//! Installed-extension wire types
//!
//! The console exposes plugins and themes as Kubernetes-style custom
//! resources. Only the fields this integration reads are modeled; the rest
//! is carried in flattened passthrough maps so that read-modify-write
//! updates never drop server-side fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Annotation key linking an installed extension to its store listing
pub const STORE_APP_ID: &str = "store.agora.dev/app-id";

/// The two installable extension kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExtensionKind {
    Plugin,
    Theme,
}

impl ExtensionKind {
    /// Lowercase noun used in user-facing messages and log fields
    pub fn noun(&self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "plugin",
            ExtensionKind::Theme => "theme",
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Object metadata (name plus annotations)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Spec of an installed extension; only the declared version is read here
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An installed plugin or theme
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Extension {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub kind: String,

    pub metadata: Metadata,

    pub spec: ExtensionSpec,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Extension {
    /// The resource name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// The declared version, if any
    pub fn version(&self) -> Option<&str> {
        self.spec.version.as_deref()
    }

    /// The store listing this extension was installed from, if bound
    pub fn store_app_id(&self) -> Option<&str> {
        self.metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(STORE_APP_ID))
            .map(String::as_str)
    }

    /// Merge the store-identity annotation into the existing annotation map
    pub fn bind_store_app_id(&mut self, app_id: &str) {
        self.metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(STORE_APP_ID.to_string(), app_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_preserves_existing_annotations() {
        let mut ext = Extension::default();
        ext.metadata
            .annotations
            .get_or_insert_with(BTreeMap::new)
            .insert("other/key".to_string(), "kept".to_string());

        ext.bind_store_app_id("app-abc");

        let annotations = ext.metadata.annotations.as_ref().unwrap();
        assert_eq!(annotations.get("other/key").map(String::as_str), Some("kept"));
        assert_eq!(ext.store_app_id(), Some("app-abc"));
    }

    #[test]
    fn unknown_fields_round_trip() {
        let raw = serde_json::json!({
            "apiVersion": "plugin.lumen.dev/v1alpha1",
            "kind": "Plugin",
            "metadata": { "name": "editor", "labels": { "a": "b" } },
            "spec": { "version": "1.2.3", "enabled": true },
            "status": { "phase": "STARTED" }
        });

        let ext: Extension = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(ext.name(), "editor");
        assert_eq!(ext.version(), Some("1.2.3"));

        let back = serde_json::to_value(&ext).unwrap();
        assert_eq!(back["status"]["phase"], "STARTED");
        assert_eq!(back["spec"]["enabled"], true);
        assert_eq!(back["metadata"]["labels"]["a"], "b");
    }

    #[test]
    fn kind_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&ExtensionKind::Plugin).unwrap(),
            "\"PLUGIN\""
        );
        assert_eq!(
            serde_json::to_string(&ExtensionKind::Theme).unwrap(),
            "\"THEME\""
        );
    }
}
