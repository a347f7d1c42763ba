//! `shipdex list` – print the (optionally filtered) starship table.

use anyhow::Result;
use shipdex_core::config::ShipdexConfig;
use shipdex_core::ManufacturerSelector;
use std::io::{self, Write};
use std::time::Duration;

use super::load_session;
use crate::cli::table;

pub async fn run_list(cfg: &ShipdexConfig, manufacturer: Option<&str>) -> Result<()> {
    // One-shot output: nothing to give visual feedback for.
    let mut session = load_session(cfg, Duration::ZERO).await?;
    if let Some(name) = manufacturer {
        let selector: ManufacturerSelector = name.parse()?;
        session.select(selector).await;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    table::render(
        &mut out,
        session.catalog(),
        session.controller().applied_selector(),
        &session.visible(),
    )?;
    out.flush()?;
    Ok(())
}
