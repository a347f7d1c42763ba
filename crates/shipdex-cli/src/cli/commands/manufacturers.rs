//! `shipdex manufacturers` – list the selector options.

use anyhow::Result;
use shipdex_core::config::ShipdexConfig;
use shipdex_core::filter::ALL;
use std::time::Duration;

use super::load_session;

pub async fn run_manufacturers(cfg: &ShipdexConfig) -> Result<()> {
    let session = load_session(cfg, Duration::ZERO).await?;
    println!("{}", ALL);
    for name in &session.catalog().manufacturers {
        println!("{}", name);
    }
    Ok(())
}
