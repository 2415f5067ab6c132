//! Scan-API client: HTTP plumbing, per-statistic endpoints, text rendering.

mod client;
pub(crate) mod format;
mod stats;

pub use client::{ScanClient, ScanConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("api error: status {0} body {1}")]
    Api(u16, String),
    #[error("api code {0}: {1}")]
    Code(i64, String),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("empty response for {0}")]
    Empty(String),
}
