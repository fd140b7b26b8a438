//! Runtime configuration types for operational parameters
//!
//! These types control runtime behavior: store endpoint, network settings,
//! retry policies, upgrade-confirmation polling, and cache staleness.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Remote store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Retry policy configurations
    #[serde(default)]
    pub retry_policies: RetryPoliciesConfig,

    /// Upgrade-confirmation polling
    #[serde(default)]
    pub poll: PollPolicy,

    /// Local cache staleness windows
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Remote store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StoreConfig {
    /// Base URL of the store backend
    #[serde(default = "default_store_url")]
    pub base_url: String,

    /// Console secret holding the personal-access-token for the store
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_url(),
            token_secret: default_token_secret(),
        }
    }
}

fn default_store_url() -> String {
    "https://store.agora.dev".to_string()
}
fn default_token_secret() -> String {
    "agora-store-token".to_string()
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// HTTP timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_user_agent() -> String {
    format!(
        "agora/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Retry policy configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPoliciesConfig {
    /// Default retry policy
    #[serde(default)]
    pub default: RetryPolicy,

    /// Annotation-binding writes after install/upgrade
    #[serde(default = "default_binding_policy")]
    pub binding: RetryPolicy,
}

impl Default for RetryPoliciesConfig {
    fn default() -> Self {
        Self {
            default: RetryPolicy::default(),
            binding: default_binding_policy(),
        }
    }
}

fn default_binding_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        strategy: RetryStrategy::ExponentialBackoff,
        backoff_multiplier: 2.0,
        initial_delay_ms: 500,
        max_delay_ms: 5000,
    }
}

/// Retry policy for an operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Retry strategy
    #[serde(default)]
    pub strategy: RetryStrategy,

    /// Backoff multiplier for exponential strategies
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            strategy: RetryStrategy::default(),
            backoff_multiplier: default_backoff_multiplier(),
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

impl RetryPolicy {
    /// Fixed-delay policy with no backoff, used by the confirmation poll
    pub fn fixed(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            strategy: RetryStrategy::FixedDelay,
            backoff_multiplier: 1.0,
            initial_delay_ms: delay_ms,
            max_delay_ms: delay_ms,
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}
fn default_backoff_multiplier() -> f64 {
    2.0
}
fn default_initial_delay() -> u64 {
    1000
}
fn default_max_delay() -> u64 {
    30000
}

/// Retry strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RetryStrategy {
    /// No delay between retries
    None,

    /// Fixed delay between retries
    FixedDelay,

    /// Exponential backoff (default)
    #[default]
    ExponentialBackoff,

    /// Linear backoff
    LinearBackoff,
}

/// Upgrade-confirmation polling parameters
///
/// After an upgrade-from-URI call returns, the server reconciles the
/// extension's declared version asynchronously; the orchestrator polls the
/// single-item endpoint until the observed version matches the expected one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PollPolicy {
    /// Fixed attempt budget
    #[serde(default = "default_poll_attempts")]
    pub max_attempts: u32,

    /// Fixed inter-attempt delay in milliseconds (no backoff)
    #[serde(default = "default_poll_delay")]
    pub delay_ms: u64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_poll_attempts(),
            delay_ms: default_poll_delay(),
        }
    }
}

fn default_poll_attempts() -> u32 {
    5
}
fn default_poll_delay() -> u64 {
    1000
}

/// Local cache staleness windows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CacheConfig {
    /// Installed-extension list staleness window in milliseconds
    #[serde(default = "default_installed_ttl")]
    pub installed_ttl_ms: u64,

    /// Host runtime version staleness window in milliseconds
    #[serde(default = "default_host_version_ttl")]
    pub host_version_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            installed_ttl_ms: default_installed_ttl(),
            host_version_ttl_ms: default_host_version_ttl(),
        }
    }
}

fn default_installed_ttl() -> u64 {
    1000
}
fn default_host_version_ttl() -> u64 {
    2000
}
