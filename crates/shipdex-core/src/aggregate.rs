//! Aggregation: derive secondary sets from the paged starships and resolve them.
//!
//! Runs once, after paging is done, over the frozen primary collection.

use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::batch;
use crate::config::ShipdexConfig;
use crate::error::FetchError;
use crate::fetch::JsonFetcher;
use crate::model::{Resource, ResourceIndex, Starship};
use crate::pagination;
use crate::view::ViewEvent;

/// Corporate suffixes that show up as separate tokens after splitting on ", ".
pub const NOISE_TOKENS: [&str; 3] = ["Inc.", "Inc", "Incorporated"];

const MANUFACTURER_SEPARATOR: &str = ", ";

/// Unique manufacturer names across `ships`, without corporate-suffix noise.
///
/// `"Corellian Engineering Corporation, Inc."` contributes only
/// `"Corellian Engineering Corporation"`.
pub fn derive_manufacturers(ships: &[Starship]) -> BTreeSet<String> {
    ships
        .iter()
        .flat_map(|s| s.manufacturer().split(MANUFACTURER_SEPARATOR))
        .filter(|token| !token.is_empty() && !NOISE_TOKENS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Unique pilot URLs referenced by `ships`.
pub fn derive_pilot_urls(ships: &[Starship]) -> BTreeSet<String> {
    ships.iter().flat_map(Starship::pilots).map(str::to_string).collect()
}

/// Unique film URLs referenced by `ships`.
pub fn derive_film_urls(ships: &[Starship]) -> BTreeSet<String> {
    ships.iter().flat_map(Starship::films).map(str::to_string).collect()
}

/// Where and how far to page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// List endpoint, e.g. `https://swapi.dev/api/starships/`.
    pub list_url: String,
    pub max_pages: Option<u32>,
}

impl LoadOptions {
    pub fn from_config(cfg: &ShipdexConfig) -> Self {
        Self {
            list_url: cfg.starships_url(),
            max_pages: cfg.page_limit(),
        }
    }
}

/// Everything the view needs once loading is complete.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Primary collection, frozen after paging.
    pub ships: Arc<[Starship]>,
    pub manufacturers: BTreeSet<String>,
    pub pilots: ResourceIndex,
    pub films: ResourceIndex,
}

impl Catalog {
    /// Resolved pilots of `ship`, in the ship's reference order.
    pub fn pilots_of<'a>(&'a self, ship: &'a Starship) -> impl Iterator<Item = &'a Resource> + 'a {
        ship.pilots().filter_map(|url| self.pilots.get(url))
    }

    /// Resolved films of `ship`, in the ship's reference order.
    pub fn films_of<'a>(&'a self, ship: &'a Starship) -> impl Iterator<Item = &'a Resource> + 'a {
        ship.films().filter_map(|url| self.films.get(url))
    }
}

async fn notify(events: Option<&mpsc::Sender<ViewEvent>>, event: ViewEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is watching.
        let _ = tx.send(event).await;
    }
}

/// Pages the list endpoint, derives the secondary sets and resolves pilots and
/// films concurrently.
///
/// Each finished stage is reported on `events`; a failure is reported as
/// [`ViewEvent::Failed`] and then returned.
pub async fn load_catalog<F>(
    fetcher: &Arc<F>,
    opts: &LoadOptions,
    events: Option<&mpsc::Sender<ViewEvent>>,
) -> Result<Catalog, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    match run_pipeline(fetcher, opts, events).await {
        Ok(catalog) => Ok(catalog),
        Err(e) => {
            tracing::error!("catalog load failed: {}", e);
            notify(events, ViewEvent::Failed(e.to_string())).await;
            Err(e)
        }
    }
}

async fn run_pipeline<F>(
    fetcher: &Arc<F>,
    opts: &LoadOptions,
    events: Option<&mpsc::Sender<ViewEvent>>,
) -> Result<Catalog, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    let ships: Arc<[Starship]> = pagination::walk(fetcher, &opts.list_url, opts.max_pages)
        .await?
        .into();
    notify(events, ViewEvent::PagingDone).await;

    let manufacturers = derive_manufacturers(&ships);
    notify(events, ViewEvent::ManufacturersReady).await;

    let pilot_urls = derive_pilot_urls(&ships);
    let film_urls = derive_film_urls(&ships);
    tracing::info!(
        ships = ships.len(),
        manufacturers = manufacturers.len(),
        pilots = pilot_urls.len(),
        films = film_urls.len(),
        "derived secondary sets"
    );

    let pilots_fut = async {
        let pilots = resolve_if_any(fetcher, &pilot_urls).await?;
        notify(events, ViewEvent::PilotsFetched).await;
        Ok::<_, FetchError>(pilots)
    };
    let films_fut = async {
        let films = resolve_if_any(fetcher, &film_urls).await?;
        notify(events, ViewEvent::FilmsFetched).await;
        Ok::<_, FetchError>(films)
    };
    let (pilots, films) = tokio::try_join!(pilots_fut, films_fut)?;

    Ok(Catalog {
        ships,
        manufacturers,
        pilots,
        films,
    })
}

async fn resolve_if_any<F>(fetcher: &Arc<F>, urls: &BTreeSet<String>) -> Result<ResourceIndex, FetchError>
where
    F: JsonFetcher + ?Sized,
{
    if urls.is_empty() {
        return Ok(ResourceIndex::new());
    }
    batch::resolve_index(fetcher, urls).await
}
