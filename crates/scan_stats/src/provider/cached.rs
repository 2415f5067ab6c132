//! Read-through cached provider: check the cache, fetch on miss, wrap in a
//! label, store, and absorb every failure into `None`.

use super::catalog::{cache_key, Scope, StatKind};
use crate::cache::{CacheError, CacheStore};
use crate::config::StatsConfig;
use crate::scan::{ScanClient, ScanError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, warn};

/// Remote side of a provider: one call per statistic, returning a fragment
/// that is already human-formatted.
#[async_trait]
pub trait StatFetcher: Send + Sync {
    async fn fetch_stat(&self, kind: StatKind) -> Result<String, ScanError>;
}

/// Why a lookup produced no snippet. Absorbed into `None` at the public
/// boundary; [`StatProvider::try_get`] callers can see the cause.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("cache: {0}")]
    Cache(#[from] CacheError),
    #[error("fetch: {0}")]
    Fetch(#[from] ScanError),
    #[error("no usable content")]
    Empty,
}

/// One cached statistic. Constructed once at startup against long-lived
/// collaborator handles; `get` is the only operation.
pub struct StatProvider<F: StatFetcher> {
    scope: Scope,
    kind: StatKind,
    fetcher: Arc<F>,
    cache: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl<F: StatFetcher> StatProvider<F> {
    pub fn new(
        scope: Scope,
        kind: StatKind,
        fetcher: Arc<F>,
        cache: Arc<dyn CacheStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            scope,
            kind,
            fetcher,
            cache,
            ttl,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn kind(&self) -> StatKind {
        self.kind
    }

    pub fn cache_key(&self) -> String {
        cache_key(self.scope, self.kind)
    }

    /// Formatted snippet, or `None` on any failure. Errors never cross this
    /// boundary; they are logged with the statistic's identity and absorbed,
    /// so the host simply omits the statistic from its context.
    pub async fn get(&self) -> Option<String> {
        match self.try_get().await {
            Ok(text) => Some(text),
            Err(err) => {
                error!(scope = %self.scope, stat = %self.kind, %err, "stat provider failed");
                None
            }
        }
    }

    /// Same lookup with the failure reason preserved.
    ///
    /// A non-empty cache hit never touches the fetcher, which bounds remote
    /// calls to one per TTL window per statistic under steady load.
    /// Concurrent misses are not coalesced: each call may fetch and write
    /// independently; writes carry the same TTL, so last-write-wins is
    /// harmless.
    pub async fn try_get(&self) -> Result<String, ProviderError> {
        let key = self.cache_key();
        let cached = self.cache.get(&key).await?;
        debug!(key = %key, hit = cached.is_some(), "stat cache check");
        if let Some(text) = cached.filter(|text| !text.trim().is_empty()) {
            return Ok(text);
        }
        let fragment = self.fetcher.fetch_stat(self.kind).await?;
        if fragment.trim().is_empty() {
            return Err(ProviderError::Empty);
        }
        let text = format!("{}:\n{}", self.kind.label(), fragment);
        if let Err(err) = self.cache.set(&key, &text, self.ttl).await {
            // Keep serving the fresh value; only the next call pays for the miss.
            warn!(key = %key, %err, "stat cache write failed");
        }
        Ok(text)
    }
}

/// Every provider the configuration enables, in catalog order.
pub struct ProviderSet<F: StatFetcher = ScanClient> {
    providers: Vec<StatProvider<F>>,
}

impl<F: StatFetcher> ProviderSet<F> {
    pub fn from_providers(providers: Vec<StatProvider<F>>) -> Self {
        Self { providers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatProvider<F>> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn find(&self, scope: Scope, kind: StatKind) -> Option<&StatProvider<F>> {
        self.providers
            .iter()
            .find(|p| p.scope() == scope && p.kind() == kind)
    }
}

/// Build providers for every scope with a configured endpoint. A scope
/// without one contributes nothing: the disabled check happens here, once at
/// construction, not per call, and no cache or remote call can ever be made
/// for a disabled scope.
pub fn build_providers(
    config: &StatsConfig,
    cache: Arc<dyn CacheStore>,
) -> Result<ProviderSet, ScanError> {
    let ttl = Duration::from_secs(config.cache_ttl_secs);
    let mut providers = Vec::new();
    for (scope, scan_config) in [(Scope::Core, &config.core), (Scope::Evm, &config.evm)] {
        let Some(scan_config) = scan_config else {
            debug!(%scope, "scope disabled, no providers built");
            continue;
        };
        let client = Arc::new(ScanClient::new(scan_config.clone())?);
        for &kind in scope.catalog() {
            providers.push(StatProvider::new(
                scope,
                kind,
                Arc::clone(&client),
                Arc::clone(&cache),
                ttl,
            ));
        }
    }
    Ok(ProviderSet { providers })
}
