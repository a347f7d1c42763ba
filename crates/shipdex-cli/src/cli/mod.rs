//! CLI for the shipdex starship catalog.

mod commands;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shipdex_core::config;

use commands::{run_browse, run_list, run_manufacturers};

/// Top-level CLI for shipdex.
#[derive(Debug, Parser)]
#[command(name = "shipdex")]
#[command(about = "shipdex: browse the SWAPI starship catalog by manufacturer", long_about = None)]
pub struct Cli {
    /// API root to use instead of the configured one (e.g. https://swapi.dev/api).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Load every starship and print the table.
    List {
        /// Only show ships whose manufacturer contains this text ("All" shows every ship).
        #[arg(long, short = 'm', value_name = "NAME")]
        manufacturer: Option<String>,
    },

    /// Load every starship and print the manufacturer names.
    Manufacturers,

    /// Load once, then re-filter interactively from manufacturer names read on stdin.
    Browse,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(base_url) = cli.base_url {
            cfg.api_base_url = base_url;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::List { manufacturer } => run_list(&cfg, manufacturer.as_deref()).await?,
            CliCommand::Manufacturers => run_manufacturers(&cfg).await?,
            CliCommand::Browse => run_browse(&cfg).await?,
        }

        Ok(())
    }
}
