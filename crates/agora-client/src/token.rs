//! Personal-access-token cache for the store API
//!
//! The token lives in a console secret. It is looked up at most once per
//! "unknown" state: a successful lookup caches the token, a missing secret
//! caches the `"NONE"` sentinel so the lookup is not repeated. The backing
//! [`TokenStore`] is injectable (the console persists it outside process
//! memory; tests use [`MemoryTokenStore`]).
//!
//! Concurrent first requests can race and resolve the secret twice; the
//! lookup is idempotent and both writers converge on the same value.

use crate::console::ConsoleClient;
use crate::error::ApiError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Key the token is cached under in the [`TokenStore`]
pub const TOKEN_CACHE_KEY: &str = "store-token";

/// Sentinel marking "checked, not available"
pub const TOKEN_ABSENT: &str = "NONE";

/// Key inside the secret's string data holding the token
const TOKEN_SECRET_KEY: &str = "token";

/// Key/value persistence for the cached token
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Cached token state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenState {
    /// Never looked up (or cleared)
    Unknown,
    /// Looked up; the console has no token for the store
    Absent,
    /// A real token is cached
    Present(String),
}

/// Resolves and caches the store personal-access-token
pub struct TokenCache {
    store: Arc<dyn TokenStore>,
    secret_name: String,
}

impl TokenCache {
    /// Create a cache reading the token from the named console secret
    pub fn new(store: Arc<dyn TokenStore>, secret_name: impl Into<String>) -> Self {
        Self {
            store,
            secret_name: secret_name.into(),
        }
    }

    /// Current cached state without any remote call
    pub fn state(&self) -> TokenState {
        match self.store.get(TOKEN_CACHE_KEY) {
            None => TokenState::Unknown,
            Some(value) if value == TOKEN_ABSENT => TokenState::Absent,
            Some(value) => TokenState::Present(value),
        }
    }

    /// Forget the cached state; the next resolve looks the secret up again
    pub fn clear(&self) {
        self.store.remove(TOKEN_CACHE_KEY);
    }

    /// The bearer token to attach, resolving the secret on first use
    ///
    /// Lookup failures other than "secret not found" do not poison the
    /// cache; the next request retries.
    pub async fn resolve(&self, console: &ConsoleClient) -> Result<Option<String>, ApiError> {
        match self.state() {
            TokenState::Present(token) => Ok(Some(token)),
            TokenState::Absent => Ok(None),
            TokenState::Unknown => match console.get_secret_quiet(&self.secret_name).await {
                Ok(secret) => {
                    let token = secret
                        .string_data
                        .and_then(|mut data| data.remove(TOKEN_SECRET_KEY))
                        .filter(|token| !token.trim().is_empty());

                    match token {
                        Some(token) => {
                            debug!(secret = %self.secret_name, "store token resolved");
                            self.store.set(TOKEN_CACHE_KEY, &token);
                            Ok(Some(token))
                        }
                        None => {
                            debug!(secret = %self.secret_name, "secret has no token entry");
                            self.store.set(TOKEN_CACHE_KEY, TOKEN_ABSENT);
                            Ok(None)
                        }
                    }
                }
                Err(err) if err.is_not_found() => {
                    debug!(secret = %self.secret_name, "token secret not found");
                    self.store.set(TOKEN_CACHE_KEY, TOKEN_ABSENT);
                    Ok(None)
                }
                Err(err) => {
                    debug!(%err, "token lookup failed, will retry on next request");
                    Ok(None)
                }
            },
        }
    }
}
