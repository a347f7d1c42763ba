//! `shipdex browse` – load once, then re-filter from stdin.
//!
//! Each input line is either an option number from the printed list or a
//! manufacturer name (substring). An empty line or EOF ends the session.

use anyhow::Result;
use shipdex_core::config::ShipdexConfig;
use shipdex_core::filter::ALL;
use shipdex_core::ManufacturerSelector;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::load_session;
use crate::cli::table;

pub async fn run_browse(cfg: &ShipdexConfig) -> Result<()> {
    let mut session = load_session(cfg, Duration::from_millis(cfg.filter_feedback_ms)).await?;

    let options: Vec<String> = std::iter::once(ALL.to_string())
        .chain(session.catalog().manufacturers.iter().cloned())
        .collect();

    {
        let mut out = io::stdout().lock();
        table::render(
            &mut out,
            session.catalog(),
            session.controller().applied_selector(),
            &session.visible(),
        )?;
        print_options(&mut out, &options)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("manufacturer> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let selector = choose(line, &options);
        if !session.controller().selector_enabled() {
            tracing::warn!("selector disabled, ignoring {:?}", line);
            continue;
        }
        eprintln!("Loading {} starships ...", selector);
        session.select(selector).await;

        let mut out = io::stdout().lock();
        table::render(
            &mut out,
            session.catalog(),
            session.controller().applied_selector(),
            &session.visible(),
        )?;
        print_options(&mut out, &options)?;
    }
    Ok(())
}

fn print_options(out: &mut impl Write, options: &[String]) -> io::Result<()> {
    writeln!(out, "Search a starship manufacturer:")?;
    for (i, name) in options.iter().enumerate() {
        writeln!(out, "  {:>3}  {}", i, name)?;
    }
    Ok(())
}

/// Maps an input line to a selector: an in-range option number picks that
/// option, anything else is taken as a manufacturer name.
fn choose(input: &str, options: &[String]) -> ManufacturerSelector {
    let name = input
        .parse::<usize>()
        .ok()
        .and_then(|i| options.get(i))
        .map(String::as_str)
        .unwrap_or(input);
    if name == ALL {
        ManufacturerSelector::All
    } else {
        ManufacturerSelector::Named(name.to_string())
    }
}
