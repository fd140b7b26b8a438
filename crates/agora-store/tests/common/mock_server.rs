//! Wiremock setup helpers for console and store endpoints

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mount the token secret as missing, forcing anonymous store access
pub async fn mount_missing_token(console: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/apis/v1alpha1/secrets/agora-store-token"))
        .respond_with(ResponseTemplate::new(404))
        .mount(console)
        .await;
}

/// Mount the actuator info endpoint with the given host version
pub async fn mount_host_version(console: &MockServer, version: &str) {
    Mock::given(method("GET"))
        .and(path("/actuator/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "build": { "version": version }
        })))
        .mount(console)
        .await;
}

/// Mount the installed-plugins list endpoint
pub async fn mount_installed_plugins(console: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/apis/api.console.lumen.dev/v1alpha1/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(console)
        .await;
}

/// Mount the store application-detail endpoint
pub async fn mount_app_detail(store: &MockServer, app_id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/apis/api.store.agora.dev/v1alpha1/applications/{app_id}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(store)
        .await;
}

/// Mount the resolve-download endpoint answering with a presigned URL
pub async fn mount_download_resolution(
    store: &MockServer,
    app_id: &str,
    release_name: &str,
    asset_name: &str,
    url: &str,
) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/apis/api.store.agora.dev/v1alpha1/applications/{app_id}/releases/{release_name}/download/{asset_name}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "url": url })))
        .mount(store)
        .await;
}

/// Mount the single-plugin fetch answering `stale` for the first
/// `stale_times` calls and `fresh` afterwards
///
/// Mount order matters: the capped stale mock is consulted first until its
/// budget is used up.
pub async fn mount_plugin_versions(
    console: &MockServer,
    name: &str,
    stale: Value,
    stale_times: u64,
    fresh: Value,
) {
    let resource = format!("/apis/plugin.lumen.dev/v1alpha1/plugins/{name}");

    Mock::given(method("GET"))
        .and(path(resource.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(stale))
        .up_to_n_times(stale_times)
        .expect(stale_times)
        .mount(console)
        .await;

    Mock::given(method("GET"))
        .and(path(resource))
        .respond_with(ResponseTemplate::new(200).set_body_json(fresh))
        .mount(console)
        .await;
}

/// Mount the single-plugin fetch with a fixed response
pub async fn mount_plugin_get(console: &MockServer, name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/apis/plugin.lumen.dev/v1alpha1/plugins/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(console)
        .await;
}

/// Mount the single-plugin update (annotation write-back)
pub async fn mount_plugin_update(console: &MockServer, name: &str, body: Value) {
    Mock::given(method("PUT"))
        .and(path(format!("/apis/plugin.lumen.dev/v1alpha1/plugins/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(console)
        .await;
}
