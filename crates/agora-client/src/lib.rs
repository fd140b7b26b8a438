//! # agora-client
//!
//! HTTP facades used by the marketplace integration:
//! - [`ConsoleClient`] — the host console API (plugins, themes, secrets)
//! - [`StoreClient`] — the remote Agora store API (listings, releases,
//!   download resolution), with bearer-token attachment
//! - [`TokenCache`] — the personal-access-token cache backed by an
//!   injectable [`TokenStore`]

pub mod console;
pub mod error;
pub mod problem;
pub mod store;
pub mod token;

pub use console::ConsoleClient;
pub use error::ApiError;
pub use problem::{Conflict, ProblemDetail, PLUGIN_ALREADY_EXISTS_TYPE, THEME_ALREADY_EXISTS_TYPE};
pub use store::StoreClient;
pub use token::{MemoryTokenStore, TokenCache, TokenState, TokenStore};
