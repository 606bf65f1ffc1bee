//! `dailywall normalize` – show how a raw image URL is resolved.

use anyhow::Result;
use dailywall_core::config::CrawlConfig;
use dailywall_core::model::ImageReference;
use dailywall_core::url_model;

pub fn run_normalize(cfg: &CrawlConfig, raw_url: &str) -> Result<()> {
    let image = ImageReference {
        url: raw_url.to_string(),
        wallpaper: String::new(),
        downloadable: true,
    };
    let n = url_model::normalize(&image, &cfg.cdn_prefix)?;
    println!("url:      {}", n.url);
    println!("filename: {}", n.filename);
    Ok(())
}
