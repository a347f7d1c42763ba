//! Wires the catalog pipeline to the view controller.
//!
//! [`load_view`] runs the pipeline while a second future drains its events
//! into a [`ViewController`]; [`Session`] then owns the frozen catalog and
//! applies selector changes against it.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::aggregate::{load_catalog, Catalog, LoadOptions};
use crate::error::FetchError;
use crate::fetch::JsonFetcher;
use crate::filter::{filter_ships, ManufacturerSelector};
use crate::model::Starship;
use crate::view::{ViewController, ViewEvent, ViewStatus};

/// Loads the catalog and returns it together with the controller that
/// observed every stage of the load.
pub async fn load_view<F>(
    fetcher: &Arc<F>,
    opts: &LoadOptions,
) -> (ViewController, Result<Catalog, FetchError>)
where
    F: JsonFetcher + ?Sized,
{
    let (tx, mut rx) = mpsc::channel::<ViewEvent>(16);
    let mut controller = ViewController::new();

    // Owning `tx` here closes the channel as soon as loading ends.
    let load = async move { load_catalog(fetcher, opts, Some(&tx)).await };
    let drive = async {
        while let Some(event) = rx.recv().await {
            let status = controller.handle(event);
            tracing::debug!(?status, "view status");
        }
    };
    let (result, ()) = tokio::join!(load, drive);
    (controller, result)
}

/// A loaded catalog plus the controller deciding what is on screen.
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    controller: ViewController,
    feedback: Duration,
}

impl Session {
    /// `feedback` is how long a re-filter stays in `Loading` before it is shown.
    pub fn new(catalog: Catalog, controller: ViewController, feedback: Duration) -> Self {
        Self {
            catalog,
            controller,
            feedback,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn status(&self) -> &ViewStatus {
        self.controller.status()
    }

    /// Ships for the selector currently applied, from the full collection.
    pub fn visible(&self) -> Vec<&Starship> {
        filter_ships(&self.catalog.ships, self.controller.applied_selector())
    }

    /// Switches the selector: enters `Loading`, waits out the feedback delay,
    /// then shows the new result set. Returns how many ships are now visible.
    pub async fn select(&mut self, selector: ManufacturerSelector) -> usize {
        self.controller.handle(ViewEvent::SelectionChanged(selector));
        let generation = self.controller.generation();
        if !self.feedback.is_zero() {
            tokio::time::sleep(self.feedback).await;
        }
        self.controller.handle(ViewEvent::FilterApplied(generation));
        let matches = self.visible().len();
        tracing::info!(
            selector = %self.controller.applied_selector(),
            matches,
            "filter applied"
        );
        matches
    }
}
