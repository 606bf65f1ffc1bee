use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry parameters for the "not yet updated" condition (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of whole-run attempts (including the first).
    pub max_attempts: u32,
    /// Fixed wait between attempts, in seconds.
    pub wait_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            wait_secs: 5,
        }
    }
}

/// Timeouts applied to both outbound HTTP calls (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/dailywall/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Image-of-the-day API endpoint.
    pub api_url: String,
    /// Market sent as the `mkt` query parameter.
    pub market: String,
    /// Value of the `accept-language` request header.
    pub accept_language: String,
    /// Prefix prepended to host-relative image URLs.
    pub cdn_prefix: String,
    /// Offset of the regional timezone that defines "today", in whole hours.
    pub utc_offset_hours: i32,
    /// Directory for downloaded images (None = XDG data dir).
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
    /// SQLite database file (None = XDG state dir).
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    #[serde(default)]
    pub http: Option<HttpConfig>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            api_url: "https://cn.bing.com/hp/api/model".to_string(),
            market: "zh-CN".to_string(),
            accept_language: "zh-CN,zh;".to_string(),
            cdn_prefix: "https://s.cn.bing.net/".to_string(),
            utc_offset_hours: 8,
            image_dir: None,
            database_path: None,
            retry: None,
            http: None,
        }
    }
}

impl CrawlConfig {
    /// Regional timezone used to compute "today".
    pub fn timezone(&self) -> Result<FixedOffset> {
        if !(-23..=23).contains(&self.utc_offset_hours) {
            anyhow::bail!(
                "utc_offset_hours must be within -23..=23, got {}",
                self.utc_offset_hours
            );
        }
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .context("invalid utc_offset_hours")
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let r = self.retry.clone().unwrap_or_default();
        RetryPolicy {
            max_attempts: r.max_attempts.max(1),
            wait: Duration::from_secs(r.wait_secs),
        }
    }

    pub fn http_config(&self) -> HttpConfig {
        self.http.clone().unwrap_or_default()
    }

    /// Image directory: configured path or `~/.local/share/dailywall/images`.
    pub fn resolve_image_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.image_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("dailywall")?;
        Ok(xdg_dirs.get_data_home().join("dailywall").join("images"))
    }

    /// Database file: configured path or `~/.local/state/dailywall/wallpapers.db`.
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("dailywall")?;
        Ok(xdg_dirs.get_state_home().join("dailywall").join("wallpapers.db"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dailywall")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CrawlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CrawlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<CrawlConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: CrawlConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    cfg.timezone()?;
    Ok(cfg)
}
