//! In-memory fetcher for unit tests: canned documents plus per-URL hit counts.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::JsonFetcher;
use crate::error::FetchError;

#[derive(Default)]
pub(crate) struct MemoryFetcher {
    docs: Mutex<HashMap<String, Value>>,
    hits: Mutex<HashMap<String, usize>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, url: &str, doc: Value) {
        self.docs.lock().unwrap().insert(url.to_string(), doc);
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }
}

impl JsonFetcher for MemoryFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;
        self.docs
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Http {
                url: url.to_string(),
                status: 404,
            })
    }
}
