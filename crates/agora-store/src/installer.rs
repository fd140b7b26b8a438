//! Install/upgrade orchestration
//!
//! Drives the asynchronous workflow against the console:
//!
//! - **install**: resolve the download URL, install from URI, bind the
//!   store-origin annotation, invalidate caches. An already-exists
//!   conflict routes into a confirmation-gated forced upgrade against the
//!   conflicting name, reusing the resolved URL.
//! - **upgrade**: require a matched installed extension, resolve the URL,
//!   upgrade from URI, then poll the single-item endpoint until the
//!   observed version equals the release version.
//!
//! Server-side reconciliation of the declared version is asynchronous, so
//! an upgrade is only reported successful once polling observes the target
//! version. Exhausting the poll budget leaves the outcome *unverified*:
//! the mutation was issued, the user is warned, and success is never
//! claimed.

use crate::download::DownloadResolver;
use crate::error::{MarketError, Result};
use crate::registry::InstalledRegistry;
use agora_client::{ApiError, Conflict, ConsoleClient};
use agora_core::notify::Notifier;
use agora_core::retry::{CancelToken, ClosurePredicate, RetryError, RetryExecutor, TracingObserver};
use agora_core::types::{
    ApplicationSearchResult, Extension, ExtensionKind, PollPolicy, RetryPolicy, RuntimeConfig,
};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Confirmation seam to the host UI's dialog layer
pub trait Confirm: Send + Sync {
    /// Ask the user to approve a step; resolves to their decision
    fn confirm<'a>(
        &'a self,
        title: &'a str,
        description: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;
}

/// Approves or declines everything; headless operation and tests
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm<'a>(
        &'a self,
        _title: &'a str,
        _description: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        let approve = self.0;
        Box::pin(async move { approve })
    }
}

/// Result of an install request
#[derive(Debug)]
pub enum InstallOutcome {
    /// Fresh install completed and bound to the listing
    Installed(Extension),

    /// Conflict path: forced upgrade over the existing extension,
    /// confirmed and bound
    Reinstalled(Extension),

    /// Forced upgrade issued but its completion could not be confirmed
    Unverified,

    /// Nothing happened: no resolvable download (already reported) or the
    /// user declined the forced reinstall
    Skipped,
}

/// Result of an upgrade request
#[derive(Debug)]
pub enum UpgradeOutcome {
    /// The target version was observed on the server
    Upgraded(Extension),

    /// Upgrade issued; polling did not observe the target version before
    /// the budget ran out (or was cancelled). Not a success, not a
    /// confirmed failure.
    Unverified,

    /// No resolvable download; the reason was already reported
    Skipped,
}

enum Confirmation {
    Confirmed(Extension),
    Unverified,
}

/// Error inside one poll attempt; only mismatches are retried
enum PollError {
    Mismatch { observed: Option<String> },
    Api(ApiError),
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::Mismatch { observed } => write!(
                f,
                "version not yet reconciled (observed {})",
                observed.as_deref().unwrap_or("none")
            ),
            PollError::Api(err) => write!(f, "{}", err),
        }
    }
}

/// Orchestrates install, forced-reinstall, and upgrade workflows
pub struct Installer {
    console: Arc<ConsoleClient>,
    registry: Arc<InstalledRegistry>,
    resolver: DownloadResolver,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
    poll: PollPolicy,
    binding_policy: RetryPolicy,
}

impl Installer {
    pub fn new(
        console: Arc<ConsoleClient>,
        registry: Arc<InstalledRegistry>,
        resolver: DownloadResolver,
        confirm: Arc<dyn Confirm>,
        notifier: Arc<dyn Notifier>,
        runtime: &RuntimeConfig,
    ) -> Self {
        Self {
            console,
            registry,
            resolver,
            confirm,
            notifier,
            poll: runtime.poll.clone(),
            binding_policy: runtime.retry_policies.binding.clone(),
        }
    }

    /// Install the listing's latest release
    pub async fn install(
        &self,
        listing: &ApplicationSearchResult,
        cancel: Option<CancelToken>,
    ) -> Result<InstallOutcome> {
        let kind = listing.kind();

        let Some(url) = self.resolver.resolve(Some(listing)).await? else {
            return Ok(InstallOutcome::Skipped);
        };

        let installed = match self.console.install_from_uri(kind, &url).await {
            Ok(extension) => extension,
            Err(err) => {
                let Some(conflict) = err.conflict() else {
                    return Err(err.into());
                };
                return self.reinstall_over(listing, conflict, &url, cancel).await;
            }
        };

        self.bind_store_id(kind, installed.name(), listing.app_id())
            .await;
        self.notifier.success("Installed successfully");
        self.registry.invalidate(kind);
        info!(kind = %kind, name = installed.name(), "install complete");
        Ok(InstallOutcome::Installed(installed))
    }

    /// Upgrade the matched installed extension to the listing's latest
    /// release
    ///
    /// A missing match is a hard failure: the listing claims to be
    /// installed but nothing carries its annotation.
    pub async fn upgrade(
        &self,
        listing: &ApplicationSearchResult,
        cancel: Option<CancelToken>,
    ) -> Result<UpgradeOutcome> {
        let kind = listing.kind();

        let Some(matched) = self.registry.find_match(kind, listing.app_id()).await? else {
            self.notifier
                .error(&format!("No matching {} found", kind.noun()));
            return Err(MarketError::NoMatch { kind });
        };

        let Some(url) = self.resolver.resolve(Some(listing)).await? else {
            return Ok(UpgradeOutcome::Skipped);
        };

        self.console
            .upgrade_from_uri(kind, matched.name(), &url)
            .await?;

        match self
            .confirm_version(kind, matched.name(), listing.latest_version(), cancel)
            .await?
        {
            Confirmation::Confirmed(extension) => {
                self.notifier.success("Upgraded successfully");
                self.registry.invalidate(kind);
                info!(kind = %kind, name = extension.name(), "upgrade confirmed");
                Ok(UpgradeOutcome::Upgraded(extension))
            }
            Confirmation::Unverified => {
                self.notifier
                    .warning("Upgrade issued, but its completion could not be confirmed");
                self.registry.invalidate(kind);
                Ok(UpgradeOutcome::Unverified)
            }
        }
    }

    /// Conflict path: the identity already exists; ask, then force-upgrade
    /// the existing extension with the already-resolved URL
    async fn reinstall_over(
        &self,
        listing: &ApplicationSearchResult,
        conflict: Conflict,
        url: &str,
        cancel: Option<CancelToken>,
    ) -> Result<InstallOutcome> {
        let kind = listing.kind();
        let title = format!("The {} is already installed. Reinstall it?", kind.noun());
        let description = "Confirm that the existing installation matches this listing. \
             Reinstalling records the store origin so future upgrades can come \
             from the marketplace.";

        if !self.confirm.confirm(&title, description).await {
            debug!(name = %conflict.name, "forced reinstall declined");
            return Ok(InstallOutcome::Skipped);
        }

        self.console
            .upgrade_from_uri(kind, &conflict.name, url)
            .await?;

        match self
            .confirm_version(kind, &conflict.name, listing.latest_version(), cancel)
            .await?
        {
            Confirmation::Confirmed(extension) => {
                self.bind_store_id(kind, extension.name(), listing.app_id())
                    .await;
                self.notifier.success("Installed successfully");
                self.registry.invalidate(kind);
                info!(kind = %kind, name = extension.name(), "forced reinstall confirmed");
                Ok(InstallOutcome::Reinstalled(extension))
            }
            Confirmation::Unverified => {
                self.notifier
                    .warning("Reinstall issued, but its completion could not be confirmed");
                self.registry.invalidate(kind);
                Ok(InstallOutcome::Unverified)
            }
        }
    }

    /// Poll the single-item endpoint until the observed version equals the
    /// expected one
    ///
    /// Fixed attempt budget, fixed delay, no backoff, no jitter. A
    /// mismatch retries; a transport error fails immediately; exhaustion
    /// and cancellation resolve to unverified.
    async fn confirm_version(
        &self,
        kind: ExtensionKind,
        name: &str,
        expected: Option<&str>,
        cancel: Option<CancelToken>,
    ) -> Result<Confirmation> {
        let policy = RetryPolicy::fixed(self.poll.max_attempts, self.poll.delay_ms);
        let mut executor = RetryExecutor::new(policy)
            .with_jitter(false)
            .with_observer(TracingObserver::new("confirm-upgrade"))
            .with_predicate(ClosurePredicate::new(|err: &PollError| {
                matches!(err, PollError::Mismatch { .. })
            }));
        if let Some(token) = cancel {
            executor = executor.with_cancel(token);
        }

        let outcome = executor
            .execute(|| async {
                let extension = self
                    .console
                    .get_extension_quiet(kind, name)
                    .await
                    .map_err(PollError::Api)?;

                if extension.version() == expected {
                    Ok(extension)
                } else {
                    Err(PollError::Mismatch {
                        observed: extension.version().map(str::to_string),
                    })
                }
            })
            .await;

        match outcome {
            Ok(extension) => Ok(Confirmation::Confirmed(extension)),
            Err(RetryError::Exhausted { attempts, .. }) => {
                warn!(kind = %kind, name, attempts, "upgrade not confirmed within poll budget");
                Ok(Confirmation::Unverified)
            }
            Err(RetryError::Cancelled { .. }) => {
                debug!(kind = %kind, name, "confirmation poll cancelled");
                Ok(Confirmation::Unverified)
            }
            Err(RetryError::NonRetryable(PollError::Api(err))) => Err(err.into()),
            Err(RetryError::NonRetryable(PollError::Mismatch { .. })) => {
                Ok(Confirmation::Unverified)
            }
        }
    }

    /// Record the store identity on a freshly installed extension
    ///
    /// Fetches the canonical server copy, merges the annotation, writes it
    /// back muted. Transient failures retry on the binding policy; a final
    /// failure surfaces as a warning while the install itself stands.
    async fn bind_store_id(&self, kind: ExtensionKind, name: &str, app_id: &str) {
        let result = RetryExecutor::new(self.binding_policy.clone())
            .with_observer(TracingObserver::new("bind-store-id"))
            .execute(|| async {
                let mut extension = self.console.get_extension_quiet(kind, name).await?;
                extension.bind_store_app_id(app_id);
                self.console.update_extension_quiet(kind, &extension).await?;
                Ok::<_, ApiError>(())
            })
            .await;

        if let Err(err) = result {
            warn!(kind = %kind, name, %err, "failed to record store origin");
            self.notifier
                .warning("Installed, but recording the store origin failed");
        }
    }
}
