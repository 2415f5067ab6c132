//! Per-scope configuration: which scan endpoints exist and the shared TTL.
//!
//! Load order: env `SCAN_STATS_CONFIG_PATH`, then `./config/scan_stats.json`,
//! then `./scan_stats.json`, else per-scope environment variables. Read once
//! at startup; never re-checked per call.

use crate::scan::ScanConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;
use url::Url;

/// Fixed snippet lifetime shared by every statistic: six hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 21_600;

const ENV_CONFIG_PATH: &str = "SCAN_STATS_CONFIG_PATH";
const ENV_CORE_URL: &str = "SCAN_STATS_CORE_URL";
const ENV_CORE_API_KEY: &str = "SCAN_STATS_CORE_API_KEY";
const ENV_EVM_URL: &str = "SCAN_STATS_EVM_URL";
const ENV_EVM_API_KEY: &str = "SCAN_STATS_EVM_API_KEY";

/// Validated configuration. A scope is enabled exactly when it holds a
/// `ScanConfig`; providers for a disabled scope are never constructed.
#[derive(Clone, Debug)]
pub struct StatsConfig {
    pub core: Option<ScanConfig>,
    pub evm: Option<ScanConfig>,
    pub cache_ttl_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            core: None,
            evm: None,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// File form of the config (JSON).
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    core: Option<RawScope>,
    #[serde(default)]
    evm: Option<RawScope>,
    #[serde(default)]
    cache_ttl_secs: Option<u64>,
}

#[derive(Deserialize)]
struct RawScope {
    url: String,
    #[serde(default)]
    api_key: Option<String>,
}

impl StatsConfig {
    /// Load config from the usual candidates; both scopes end up disabled
    /// when nothing is configured.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            let p = Path::new(&path);
            if p.exists() {
                return Self::load_from_path(p);
            }
        }
        for candidate in [
            Path::new("./config/scan_stats.json"),
            Path::new("./scan_stats.json"),
        ] {
            if candidate.exists() {
                return Self::load_from_path(candidate);
            }
        }
        Self::from_env()
    }

    /// Load from a JSON file. Missing or malformed content falls back to the
    /// default (both scopes disabled).
    pub fn load_from_path(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        let raw: RawConfig = serde_json::from_str(&content).unwrap_or_default();
        Self::from_raw(raw)
    }

    /// Build from `SCAN_STATS_{CORE,EVM}_URL` / `_API_KEY` variables.
    pub fn from_env() -> Self {
        let raw = RawConfig {
            core: scope_from_env(ENV_CORE_URL, ENV_CORE_API_KEY),
            evm: scope_from_env(ENV_EVM_URL, ENV_EVM_API_KEY),
            cache_ttl_secs: None,
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Self {
        Self {
            core: raw.core.and_then(|s| validate_scope("core", s)),
            evm: raw.evm.and_then(|s| validate_scope("evm", s)),
            cache_ttl_secs: raw.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

fn scope_from_env(url_var: &str, key_var: &str) -> Option<RawScope> {
    let url = std::env::var(url_var)
        .ok()
        .filter(|u| !u.trim().is_empty())?;
    Some(RawScope {
        url,
        api_key: std::env::var(key_var)
            .ok()
            .filter(|k| !k.trim().is_empty()),
    })
}

/// An unusable URL disables the scope instead of failing startup; snippet
/// provisioning is best-effort and must not take the host down.
fn validate_scope(scope: &str, raw: RawScope) -> Option<ScanConfig> {
    match Url::parse(&raw.url) {
        Ok(_) => {
            let mut config = ScanConfig::new(raw.url);
            config.api_key = raw.api_key;
            Some(config)
        }
        Err(err) => {
            warn!(scope, url = %raw.url, %err, "invalid scan URL, scope disabled");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_file_parses() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"core": {{"url": "https://scan.example/api", "api_key": "k1"}}, "cache_ttl_secs": 60}}"#
        )
        .unwrap();
        let config = StatsConfig::load_from_path(f.path());
        let core = config.core.expect("core enabled");
        assert_eq!(core.base_url, "https://scan.example/api");
        assert_eq!(core.api_key.as_deref(), Some("k1"));
        assert!(config.evm.is_none());
        assert_eq!(config.cache_ttl_secs, 60);
    }

    #[test]
    fn invalid_url_disables_scope() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{"evm": {{"url": "not a url"}}}}"#).unwrap();
        let config = StatsConfig::load_from_path(f.path());
        assert!(config.core.is_none());
        assert!(config.evm.is_none());
        assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn missing_file_is_default() {
        let config = StatsConfig::load_from_path(Path::new("./does-not-exist.json"));
        assert!(config.core.is_none());
        assert!(config.evm.is_none());
        assert_eq!(config.cache_ttl_secs, DEFAULT_CACHE_TTL_SECS);
    }
}
