use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::tree::store::DEFAULT_ROOT_NAME;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeViewConfig {
    /// Name of the root node present at startup
    pub initial_root_name: String,
    pub tick_rate_ms: u64,
    /// Draw `[R]`/`[F]` instead of emoji icons
    pub ascii_icons: bool,
    pub show_log_panel: bool,
    pub log_level: String,
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            initial_root_name: DEFAULT_ROOT_NAME.to_string(),
            tick_rate_ms: 250,
            ascii_icons: false,
            show_log_panel: false,
            log_level: "info".to_string(),
        }
    }
}

impl TreeViewConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid treeview configuration")?;
        config.log_level_filter()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn log_level_filter(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("Invalid log level '{}'", self.log_level))
    }
}
