//! HTTP plumbing shared by every statistic endpoint: request spacing,
//! bounded retries, envelope decoding.

use super::ScanError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const RATE_LIMIT_MS: u64 = 200;
const MAX_RETRIES: u32 = 3;
const RETRY_BACKOFF_MS: u64 = 500;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one scan endpoint (one chain space).
#[derive(Clone, Debug)]
pub struct ScanConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub rate_limit_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl ScanConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            rate_limit_ms: RATE_LIMIT_MS,
            max_retries: MAX_RETRIES,
            retry_backoff_ms: RETRY_BACKOFF_MS,
        }
    }
}

/// Response envelope shared by all scan endpoints. A non-zero `code` is an
/// API-level error even on HTTP 200.
#[derive(Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

/// Client for one scan endpoint, with request spacing and bounded retries.
/// Timeouts live here, not in providers.
pub struct ScanClient {
    config: ScanConfig,
    client: reqwest::Client,
    last_request: Mutex<Option<Instant>>,
    request_count: AtomicU64,
}

impl ScanClient {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            config,
            client,
            last_request: Mutex::new(None),
            request_count: AtomicU64::new(0),
        })
    }

    /// Successful requests issued since construction.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    async fn rate_limit(&self) {
        let sleep_ms = {
            let last = self.last_request.lock().unwrap();
            match *last {
                Some(prev) => {
                    let elapsed = prev.elapsed().as_millis() as u64;
                    self.config.rate_limit_ms.saturating_sub(elapsed)
                }
                None => 0,
            }
        };
        if sleep_ms > 0 {
            tokio::time::sleep(Duration::from_millis(sleep_ms)).await;
        }
        *self.last_request.lock().unwrap() = Some(Instant::now());
    }

    /// GET `path` and decode the envelope's `data`, retrying transport and
    /// HTTP-level failures with exponential backoff.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ScanError> {
        let mut url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        if let Some(key) = &self.config.api_key {
            let sep = if url.contains('?') { '&' } else { '?' };
            url = format!("{url}{sep}apiKey={key}");
        }
        let mut last_err = None;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let ms = self.config.retry_backoff_ms * (1 << (attempt - 1));
                warn!(attempt, ms, "retrying scan request");
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
            self.rate_limit().await;
            debug!(path, attempt, "scan request");
            match self.client.get(&url).send().await {
                Ok(res) => {
                    let status = res.status();
                    let body = res.text().await.unwrap_or_default();
                    if !status.is_success() {
                        last_err = Some(ScanError::Api(status.as_u16(), body));
                        continue;
                    }
                    self.request_count.fetch_add(1, Ordering::Relaxed);
                    let envelope: Envelope<T> = serde_json::from_str(&body)?;
                    if envelope.code != 0 {
                        return Err(ScanError::Code(envelope.code, envelope.message));
                    }
                    return envelope
                        .data
                        .ok_or_else(|| ScanError::Empty(path.to_string()));
                }
                Err(e) => {
                    last_err = Some(ScanError::Request(e));
                }
            }
        }
        Err(last_err.unwrap_or_else(|| ScanError::Api(0, "unreachable".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_data() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"code":0,"message":"ok","data":{"tps":"45.2"}}"#).unwrap();
        assert_eq!(envelope.code, 0);
        assert!(envelope.data.is_some());
    }

    #[test]
    fn envelope_tolerates_missing_message() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"code":10001}"#).unwrap();
        assert_eq!(envelope.code, 10001);
        assert!(envelope.message.is_empty());
        assert!(envelope.data.is_none());
    }

    #[test]
    fn config_defaults() {
        let config = ScanConfig::new("https://scan.example/api");
        assert_eq!(config.rate_limit_ms, 200);
        assert_eq!(config.max_retries, 3);
        assert!(config.api_key.is_none());
    }
}
