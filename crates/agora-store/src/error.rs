//! Error types for the marketplace workflow

use agora_client::ApiError;
use agora_core::types::ExtensionKind;
use thiserror::Error;

/// Result type alias using agora-store's error type
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors from the marketplace workflow
#[derive(Debug, Error)]
pub enum MarketError {
    /// A console or store API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Upgrade requested for a listing with no installed counterpart
    #[error("no matching {kind} found")]
    NoMatch { kind: ExtensionKind },
}
