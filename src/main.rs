use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod components;
mod config;
mod logging;
mod menu;
mod screens;
mod statusbar;
mod tree;
mod ui;
mod ui_utils;

use config::TreeViewConfig;
use ui::App;

/// Interactive tree editor for the terminal
#[derive(Debug, Parser)]
#[command(name = "treeview", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", value_parser = clap::value_parser!(log::LevelFilter))]
    log_level: Option<log::LevelFilter>,

    /// Use ASCII markers instead of emoji icons
    #[arg(long)]
    ascii_icons: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<TreeViewConfig> {
        let mut config = match &self.config {
            Some(path) => TreeViewConfig::load(path)?,
            None => TreeViewConfig::default(),
        };
        if let Some(level) = self.log_level {
            config.log_level = level.to_string().to_lowercase();
        }
        if self.ascii_icons {
            config.ascii_icons = true;
        }
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logger(config.log_level_filter()?);
    log::debug!("Starting with {config:?}");

    let mut app = App::new(&config);
    app.run().await?;

    Ok(())
}
