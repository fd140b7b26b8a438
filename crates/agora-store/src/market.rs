//! Composition root wiring the marketplace services together

use crate::compare::CompatibilityEvaluator;
use crate::download::DownloadResolver;
use crate::error::Result;
use crate::host::HostVersion;
use crate::installer::{Confirm, Installer};
use crate::registry::InstalledRegistry;
use agora_client::{ConsoleClient, StoreClient, TokenStore};
use agora_core::config::AgoraConfig;
use agora_core::notify::Notifier;
use std::sync::Arc;

/// The wired marketplace integration
pub struct Market {
    pub console: Arc<ConsoleClient>,
    pub store: Arc<StoreClient>,
    pub registry: Arc<InstalledRegistry>,
    pub host: Arc<HostVersion>,
    pub evaluator: CompatibilityEvaluator,
    pub installer: Installer,
}

impl Market {
    /// Wire all services against a console base URL and configuration
    ///
    /// The notifier, confirmation dialog, and token store are the seams to
    /// the host UI; tests inject recording/in-memory implementations.
    pub fn new(
        console_url: &str,
        config: &AgoraConfig,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
        token_store: Arc<dyn TokenStore>,
    ) -> Result<Self> {
        let runtime = &config.runtime;

        let console = Arc::new(ConsoleClient::new(
            console_url,
            &runtime.network,
            notifier.clone(),
        )?);
        let store = Arc::new(StoreClient::new(
            &runtime.store,
            &runtime.network,
            console.clone(),
            token_store,
        )?);
        let registry = Arc::new(InstalledRegistry::new(
            console.clone(),
            runtime.cache.installed_ttl_ms,
        ));
        let host = Arc::new(HostVersion::new(
            console.clone(),
            runtime.cache.host_version_ttl_ms,
        ));
        let evaluator = CompatibilityEvaluator::new(
            store.clone(),
            registry.clone(),
            host.clone(),
            &runtime.cache,
        );
        let resolver = DownloadResolver::new(store.clone(), notifier.clone());
        let installer = Installer::new(
            console.clone(),
            registry.clone(),
            resolver,
            confirm,
            notifier,
            runtime,
        );

        Ok(Self {
            console,
            store,
            registry,
            host,
            evaluator,
            installer,
        })
    }
}
