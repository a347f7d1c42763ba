//! CLI command handlers, one per file.

mod browse;
mod list;
mod manufacturers;

pub use browse::run_browse;
pub use list::run_list;
pub use manufacturers::run_manufacturers;

use anyhow::{Context, Result};
use shipdex_core::aggregate::LoadOptions;
use shipdex_core::config::ShipdexConfig;
use shipdex_core::session::{self, Session};
use shipdex_core::CurlFetcher;
use std::sync::Arc;
use std::time::Duration;

/// Runs the full load and returns a session ready for filtering.
///
/// `feedback` is the delay applied to later selector changes.
async fn load_session(cfg: &ShipdexConfig, feedback: Duration) -> Result<Session> {
    let fetcher = Arc::new(CurlFetcher::new(&cfg.http));
    let opts = LoadOptions::from_config(cfg);
    eprintln!("Loading starships from {} ...", opts.list_url);

    let (controller, result) = session::load_view(&fetcher, &opts).await;
    let catalog = result.with_context(|| format!("loading catalog from {}", cfg.api_base_url))?;
    tracing::debug!(status = ?controller.status(), "initial load finished");
    Ok(Session::new(catalog, controller, feedback))
}
