//! # agora-core
//!
//! Core library for the Agora marketplace integration providing:
//! - Configuration file parsing (agora.yaml)
//! - Wire types for installed extensions and store listings
//! - Retry execution engine with policy-based configuration
//! - The notification seam towards the host console UI

pub mod config;
pub mod error;
pub mod notify;
pub mod retry;
pub mod types;

pub use config::AgoraConfig;
pub use error::{Error, Result};
pub use notify::{Notifier, NullNotifier, TracingNotifier};
