//! CLI for the dailywall crawler.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dailywall_core::config::{self, CrawlConfig};
use dailywall_core::store::WallpaperDb;
use std::path::PathBuf;

use commands::{run_crawl, run_history, run_normalize};

/// Top-level CLI for the dailywall crawler.
#[derive(Debug, Parser)]
#[command(name = "dailywall")]
#[command(about = "Fetch today's image-of-the-day wallpaper and record it", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/dailywall/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch, download and record today's wallpaper (default).
    Run,

    /// Show recently recorded wallpapers.
    History {
        /// Maximum number of records to show.
        #[arg(long, default_value = "10", value_name = "N")]
        limit: u32,
    },

    /// Print the canonical download URL and filename for a raw vendor image URL.
    Normalize {
        /// Raw image URL as returned by the API.
        url: String,
    },
}

impl Cli {
    fn load_config(&self) -> Result<CrawlConfig> {
        match &self.config {
            Some(path) => config::load_from_path(path),
            None => config::load_or_init(),
        }
    }

    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or(CliCommand::Run) {
            CliCommand::Run => {
                let db = open_db(&cfg).await?;
                let result = run_crawl(&db, &cfg).await;
                db.close().await;
                result?;
            }
            CliCommand::History { limit } => {
                let db = open_db(&cfg).await?;
                run_history(&db, limit).await?;
                db.close().await;
            }
            CliCommand::Normalize { url } => run_normalize(&cfg, &url)?,
        }

        Ok(())
    }
}

async fn open_db(cfg: &CrawlConfig) -> Result<WallpaperDb> {
    let path = cfg.resolve_database_path()?;
    WallpaperDb::open_at(&path)
        .await
        .with_context(|| format!("failed to open database {}", path.display()))
}

#[cfg(test)]
mod tests;
