//! Context-block assembly from provider snippets.
//!
//! The host injects the rendered block into a conversation; statistics that
//! resolved to nothing are simply absent from it.

use scan_stats::{ProviderSet, Scope, StatFetcher, StatKind};

/// One gathered snippet with its origin.
#[derive(Clone, Debug)]
pub struct Snippet {
    pub scope: Scope,
    pub kind: StatKind,
    pub text: String,
}

/// Call every provider in catalog order, keeping the snippets that resolved.
pub async fn gather<F: StatFetcher>(providers: &ProviderSet<F>) -> Vec<Snippet> {
    let mut snippets = Vec::new();
    for provider in providers.iter() {
        if let Some(text) = provider.get().await {
            snippets.push(Snippet {
                scope: provider.scope(),
                kind: provider.kind(),
                text,
            });
        }
    }
    snippets
}

/// Render gathered snippets as one block, grouped per scope in catalog
/// order. Empty input renders an empty string, not a header-only block.
pub fn render(snippets: &[Snippet]) -> String {
    let mut out = String::new();
    for scope in [Scope::Core, Scope::Evm] {
        let scoped: Vec<&Snippet> = snippets.iter().filter(|s| s.scope == scope).collect();
        if scoped.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("## {} network statistics\n", heading(scope)));
        for snippet in scoped {
            out.push('\n');
            out.push_str(&snippet.text);
            out.push('\n');
        }
    }
    out
}

fn heading(scope: Scope) -> &'static str {
    match scope {
        Scope::Core => "Core space",
        Scope::Evm => "EVM space",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scan_stats::{CacheStore, MemoryCache, ScanError, StatProvider};
    use std::sync::Arc;
    use std::time::Duration;

    /// Serves TPS only; everything else errors like a dead endpoint.
    struct TpsOnlyFetcher;

    #[async_trait]
    impl StatFetcher for TpsOnlyFetcher {
        async fn fetch_stat(&self, kind: StatKind) -> Result<String, ScanError> {
            match kind {
                StatKind::Tps => Ok("45.2".to_string()),
                _ => Err(ScanError::Api(500, "down".to_string())),
            }
        }
    }

    fn snippet(scope: Scope, kind: StatKind, text: &str) -> Snippet {
        Snippet {
            scope,
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn render_empty_is_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn render_groups_by_scope() {
        let snippets = vec![
            snippet(Scope::Core, StatKind::Tps, "TPS:\n45.2"),
            snippet(Scope::Evm, StatKind::Contracts, "Contracts:\n7,421"),
        ];
        let block = render(&snippets);
        assert_eq!(
            block,
            "## Core space network statistics\n\nTPS:\n45.2\n\n## EVM space network statistics\n\nContracts:\n7,421\n"
        );
    }

    #[test]
    fn render_skips_empty_scope() {
        let snippets = vec![snippet(Scope::Evm, StatKind::Tps, "TPS:\n45.2")];
        let block = render(&snippets);
        assert!(block.starts_with("## EVM space"));
        assert!(!block.contains("Core space"));
    }

    #[tokio::test]
    async fn gather_keeps_only_resolved_snippets() {
        let fetcher = Arc::new(TpsOnlyFetcher);
        let cache: Arc<dyn CacheStore> = Arc::new(MemoryCache::new());
        let ttl = Duration::from_secs(60);
        let providers = ProviderSet::from_providers(vec![
            StatProvider::new(
                Scope::Core,
                StatKind::Transactions,
                Arc::clone(&fetcher),
                Arc::clone(&cache),
                ttl,
            ),
            StatProvider::new(Scope::Core, StatKind::Tps, fetcher, cache, ttl),
        ]);

        let snippets = gather(&providers).await;
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].kind, StatKind::Tps);
        assert_eq!(snippets[0].text, "TPS:\n45.2");
    }
}
