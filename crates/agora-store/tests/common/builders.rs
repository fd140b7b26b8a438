//! Builders for listings and wire payloads used across test files

use agora_core::types::{
    ApplicationRelease, ApplicationSearchResult, ExtensionKind, ReleaseSpec,
};
use serde_json::{json, Value};

/// The listing id most tests bind extensions to
pub const APP_ID: &str = "app-1";

/// Build a listing with an optional latest release
pub fn listing(
    app_id: &str,
    kind: ExtensionKind,
    version: Option<&str>,
    requires: Option<&str>,
) -> ApplicationSearchResult {
    let mut listing = ApplicationSearchResult::default();
    listing.application.metadata.name = app_id.to_string();
    listing.application.spec.display_name = app_id.to_string();
    listing.application.spec.kind = kind;

    listing.latest_release = version.map(|version| {
        let mut release = ApplicationRelease::default();
        release.metadata.name = format!("{app_id}-release");
        release.spec = ReleaseSpec {
            display_name: version.to_string(),
            version: Some(version.to_string()),
            requires: requires.map(str::to_string),
            ..Default::default()
        };
        release
    });

    listing
}

/// Installed-extension payload, optionally bound to a listing
pub fn extension_json(name: &str, app_id: Option<&str>, version: &str) -> Value {
    let mut ext = json!({
        "apiVersion": "plugin.lumen.dev/v1alpha1",
        "kind": "Plugin",
        "metadata": { "name": name },
        "spec": { "version": version }
    });
    if let Some(app_id) = app_id {
        ext["metadata"]["annotations"] = json!({ "store.agora.dev/app-id": app_id });
    }
    ext
}

/// List envelope as returned by console and store list endpoints
pub fn list_json(items: Vec<Value>) -> Value {
    json!({
        "page": 1,
        "size": 50,
        "total": items.len(),
        "items": items
    })
}

/// Store search-result payload with a latest release
pub fn search_result_json(app_id: &str, version: &str, requires: Option<&str>) -> Value {
    let mut release_spec = json!({
        "displayName": version,
        "version": version
    });
    if let Some(requires) = requires {
        release_spec["requires"] = json!(requires);
    }
    json!({
        "application": {
            "metadata": { "name": app_id },
            "spec": { "displayName": app_id, "type": "PLUGIN" }
        },
        "latestRelease": {
            "metadata": { "name": format!("{app_id}-release") },
            "spec": release_spec
        }
    })
}

/// Full application detail with downloadable assets
pub fn app_detail_json(app_id: &str, release_name: &str, version: &str, assets: &[&str]) -> Value {
    let assets: Vec<Value> = assets
        .iter()
        .map(|asset| json!({ "metadata": { "name": asset } }))
        .collect();
    json!({
        "application": {
            "metadata": { "name": app_id },
            "spec": { "displayName": app_id, "type": "PLUGIN" }
        },
        "latestRelease": {
            "release": {
                "metadata": { "name": release_name },
                "spec": { "displayName": version, "version": version }
            },
            "assets": assets
        }
    })
}

/// Application detail whose latest release has no assets
pub fn app_detail_without_assets_json(app_id: &str) -> Value {
    json!({
        "application": {
            "metadata": { "name": app_id },
            "spec": { "displayName": app_id, "type": "PLUGIN" }
        },
        "latestRelease": {
            "release": {
                "metadata": { "name": format!("{app_id}-release") },
                "spec": { "displayName": "1.0.0", "version": "1.0.0" }
            },
            "assets": []
        }
    })
}
