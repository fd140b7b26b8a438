//! Type definitions shared across the Agora workspace

mod application;
mod extension;
mod runtime_config;

pub use application::{
    Application, ApplicationDetail, ApplicationSearchResult, ApplicationSpec, ApplicationRelease,
    ListResponse, PriceConfig, PriceMode, ReleaseAsset, ReleaseDetail, ReleaseSpec,
};
pub use extension::{Extension, ExtensionKind, ExtensionSpec, Metadata, STORE_APP_ID};
pub use runtime_config::{
    CacheConfig, NetworkConfig, PollPolicy, RetryPoliciesConfig, RetryPolicy, RetryStrategy,
    RuntimeConfig, StoreConfig,
};
