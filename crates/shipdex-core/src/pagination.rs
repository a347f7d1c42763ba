//! Pagination walker for the starship list endpoint.
//!
//! The page count is only known by reading each page's `next` reference, so
//! pages are fetched strictly one after another.

use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

use crate::error::FetchError;
use crate::fetch::{fetch_json_async, JsonFetcher};
use crate::model::{ListPage, Starship};

/// Position of the walker in the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Fetch this page (1-based) next.
    Page(u32),
    /// The last page has been read.
    Done,
}

/// Derives the next cursor from a page's `next` reference.
///
/// `None` ends the walk. Otherwise the page number is read from the `page`
/// query parameter, e.g. `https://swapi.dev/api/starships/?page=2` -> `Page(2)`.
pub fn next_cursor(next: Option<&str>) -> Result<Cursor, FetchError> {
    let Some(next) = next else {
        return Ok(Cursor::Done);
    };
    let exhausted = || FetchError::Exhaustion {
        next: next.to_string(),
    };
    let url = Url::parse(next).map_err(|_| exhausted())?;
    url.query_pairs()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse::<u32>().ok())
        .filter(|&n| n > 0)
        .map(Cursor::Page)
        .ok_or_else(exhausted)
}

/// URL of page `page` of the list endpoint at `list_url`.
///
/// Any existing `page` parameter is replaced; other query parameters are kept.
pub fn page_url(list_url: &str, page: u32) -> Result<String, FetchError> {
    let mut url = Url::parse(list_url).map_err(|e| FetchError::decode(list_url, e.to_string()))?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string());
    Ok(url.into())
}

/// Walks every page of `list_url` and returns the accumulated starships.
///
/// Stops when a page has no `next` reference. With `max_pages = Some(n)` the walk
/// fails with [`FetchError::PageLimit`] instead of reading page `n + 1`.
/// A record whose `url` was already accumulated is dropped.
pub async fn walk<F>(
    fetcher: &Arc<F>,
    list_url: &str,
    max_pages: Option<u32>,
) -> Result<Vec<Starship>, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    let mut ships: Vec<Starship> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut cursor = Cursor::Page(1);
    let mut pages_read = 0u32;

    while let Cursor::Page(page) = cursor {
        if let Some(limit) = max_pages {
            if pages_read >= limit {
                return Err(FetchError::PageLimit { limit });
            }
        }

        let url = page_url(list_url, page)?;
        let doc = fetch_json_async(fetcher, &url).await?;
        let list: ListPage =
            serde_json::from_value(doc).map_err(|e| FetchError::decode(&url, e.to_string()))?;
        pages_read += 1;

        let received = list.results.len();
        for value in list.results {
            let ship = Starship::from_value(value, &url)?;
            if seen.insert(ship.url().to_string()) {
                ships.push(ship);
            } else {
                tracing::warn!(page, url = %ship.url(), "duplicate starship across pages, dropped");
            }
        }

        cursor = next_cursor(list.next.as_deref())?;
        tracing::debug!(page, received, total = ships.len(), next = ?cursor, "list page read");
    }

    tracing::info!("paging done: {} starships over {} page(s)", ships.len(), pages_read);
    Ok(ships)
}
