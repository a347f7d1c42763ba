//! Batch resolver: fetch a known set of URLs concurrently.
//!
//! Unlike the list endpoint, every secondary URL is known up front, so the
//! whole set is issued at once (one blocking task per URL, no limit) instead of
//! being walked one by one. The first failure fails the batch.

use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::FetchError;
use crate::fetch::JsonFetcher;
use crate::model::{Resource, ResourceIndex};

/// Fetches every URL in `urls` concurrently and returns the decoded bodies in
/// the set's iteration order, one entry per URL.
pub async fn resolve_all<F>(fetcher: &Arc<F>, urls: &BTreeSet<String>) -> Result<Vec<Value>, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    let mut join_set = JoinSet::new();
    for (idx, url) in urls.iter().enumerate() {
        let fetcher = Arc::clone(fetcher);
        let url = url.clone();
        join_set.spawn_blocking(move || (idx, fetcher.fetch_json(&url)));
    }

    let mut slots: Vec<Option<Value>> = vec![None; urls.len()];
    while let Some(joined) = join_set.join_next().await {
        let (idx, result) = joined?;
        match result {
            Ok(doc) => slots[idx] = Some(doc),
            Err(e) => {
                tracing::warn!("batch of {} failed: {}", urls.len(), e);
                join_set.abort_all();
                return Err(e);
            }
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Resolves `urls` and indexes the resulting resources by the URL each was fetched from.
pub async fn resolve_index<F>(fetcher: &Arc<F>, urls: &BTreeSet<String>) -> Result<ResourceIndex, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    let docs = resolve_all(fetcher, urls).await?;
    urls.iter()
        .zip(docs)
        .map(|(url, doc)| Ok((url.clone(), Resource::from_value(url, doc)?)))
        .collect()
}
