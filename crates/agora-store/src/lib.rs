//! # agora-store
//!
//! The marketplace workflow core:
//! - Version comparison with prerelease-inclusive range evaluation
//! - Installed-extension registry with staleness-window caching
//! - Compatibility evaluation between listings and installed extensions
//! - Download resolution through the store's presigned-URL indirection
//! - Install/upgrade orchestration with conflict-gated forced reinstall
//!   and poll-based upgrade confirmation

pub mod actions;
pub mod compare;
pub mod download;
pub mod error;
pub mod host;
pub mod installer;
pub mod market;
pub mod registry;
pub mod version;

pub use actions::{primary_action, ListingAction};
pub use compare::{AppCompare, CompatibilityEvaluator, ExtensionCompare};
pub use download::DownloadResolver;
pub use error::{MarketError, Result};
pub use host::HostVersion;
pub use installer::{AutoConfirm, Confirm, InstallOutcome, Installer, UpgradeOutcome};
pub use market::Market;
pub use registry::InstalledRegistry;
pub use version::{satisfies_requires, update_available};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
