//! Fetch gateway: one URL in, one decoded JSON document out.
//!
//! The pipeline only depends on the [`JsonFetcher`] trait. [`CurlFetcher`] is the
//! production implementation; failures are returned as-is, never retried.

mod http;
#[cfg(test)]
pub(crate) mod memory;

pub use http::CurlFetcher;

use serde_json::Value;
use std::sync::Arc;

use crate::error::FetchError;

/// Blocking GET + JSON decode of a single URL.
///
/// Implementations must be callable from several threads at once: the batch
/// resolver runs one call per URL on the blocking pool.
pub trait JsonFetcher: Send + Sync + 'static {
    fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Runs `fetcher.fetch_json(url)` on tokio's blocking pool.
pub async fn fetch_json_async<F>(fetcher: &Arc<F>, url: &str) -> Result<Value, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    let fetcher = Arc::clone(fetcher);
    let url = url.to_string();
    tokio::task::spawn_blocking(move || fetcher.fetch_json(&url)).await?
}
