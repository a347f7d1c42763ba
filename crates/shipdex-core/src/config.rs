use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Public SWAPI mirror used when no config file overrides it.
pub const DEFAULT_API_BASE_URL: &str = "https://swapi.dev/api";

/// Per-request curl timeouts (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/shipdex/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipdexConfig {
    /// API root; the starship list lives at `<api_base_url>/starships/`.
    pub api_base_url: String,
    /// Pause before a re-filtered view is shown, in milliseconds (0 = immediate).
    pub filter_feedback_ms: u64,
    /// Stop paging after this many pages (0 = follow `next` forever).
    pub max_pages: u32,
    pub http: HttpConfig,
}

impl Default for ShipdexConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            filter_feedback_ms: 1000,
            max_pages: 1000,
            http: HttpConfig::default(),
        }
    }
}

impl ShipdexConfig {
    /// Page cap for the pagination walker, `None` when unbounded.
    pub fn page_limit(&self) -> Option<u32> {
        (self.max_pages > 0).then_some(self.max_pages)
    }

    /// URL of the first list page, without the `page` query parameter.
    pub fn starships_url(&self) -> String {
        format!("{}/starships/", self.api_base_url.trim_end_matches('/'))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("shipdex")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ShipdexConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ShipdexConfig> {
    if !path.exists() {
        let default_cfg = ShipdexConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ShipdexConfig =
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}
