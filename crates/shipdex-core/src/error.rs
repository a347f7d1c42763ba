//! Error taxonomy for catalog fetching.
//!
//! Nothing here is recovered locally: the gateway, walker and aggregator all
//! propagate with `?` and the view layer shows the failure.

use thiserror::Error;

/// Error returned by any stage of the catalog pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported a transport failure (DNS, connect, timeout, reset).
    #[error("GET {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Server answered with a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    /// Body was not JSON, or the JSON did not have the expected shape.
    #[error("decoding {url}: {reason}")]
    Decode { url: String, reason: String },

    /// The `next` reference did not yield a usable page number.
    #[error("no usable page cursor in next reference {next:?}")]
    Exhaustion { next: String },

    /// Pagination hit the configured page cap without reaching the last page.
    #[error("pagination stopped after {limit} pages without reaching the last page")]
    PageLimit { limit: u32 },

    /// A blocking fetch task panicked or was cancelled.
    #[error("fetch task: {0}")]
    Join(String),
}

impl FetchError {
    pub(crate) fn decode(url: &str, reason: impl Into<String>) -> Self {
        FetchError::Decode {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<tokio::task::JoinError> for FetchError {
    fn from(e: tokio::task::JoinError) -> Self {
        FetchError::Join(e.to_string())
    }
}
