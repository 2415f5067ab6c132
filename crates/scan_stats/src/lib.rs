//! scan_stats: cached network-statistic snippets for agent context.
//!
//! Each statistic is fetched from a scan-style analytics API, wrapped in a
//! label, and cached for six hours. Failures never propagate: a provider
//! yields its snippet or nothing, and the host omits what it did not get.

pub mod cache;
pub mod config;
pub mod provider;
pub mod scan;

pub use cache::{CacheError, CacheStore, MemoryCache, SqliteCache};
pub use config::{StatsConfig, DEFAULT_CACHE_TTL_SECS};
pub use provider::{
    build_providers, cache_key, ProviderError, ProviderSet, Scope, StatFetcher, StatKind,
    StatProvider,
};
pub use scan::{ScanClient, ScanConfig, ScanError};
