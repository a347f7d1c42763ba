//! libcurl-backed fetcher.

use serde_json::Value;
use std::str;
use std::time::Duration;

use super::JsonFetcher;
use crate::config::HttpConfig;
use crate::error::FetchError;

/// Performs GET requests with a fresh curl easy handle per call.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlFetcher {
    pub fn new(http: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(http.connect_timeout_secs),
            timeout: Duration::from_secs(http.timeout_secs),
        }
    }

    fn get(&self, url: &str) -> Result<(u32, Vec<u8>), curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok((code, body))
    }
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl JsonFetcher for CurlFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!(%url, "GET");
        let (code, body) = self.get(url).map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: code,
            });
        }
        decode_body(url, &body)
    }
}

/// Parse a response body as JSON.
fn decode_body(url: &str, body: &[u8]) -> Result<Value, FetchError> {
    serde_json::from_slice(body).map_err(|e| {
        let preview = str::from_utf8(&body[..body.len().min(64)]).unwrap_or("<binary>");
        tracing::warn!(%url, "response is not JSON: {} (body starts {:?})", e, preview);
        FetchError::decode(url, e.to_string())
    })
}
