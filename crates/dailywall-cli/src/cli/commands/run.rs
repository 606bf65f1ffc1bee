//! `dailywall run` – one full crawl.

use anyhow::Result;
use dailywall_core::config::CrawlConfig;
use dailywall_core::crawler::{CrawlSettings, Crawler};
use dailywall_core::http::CurlClient;
use dailywall_core::store::WallpaperDb;
use std::sync::Arc;

pub async fn run_crawl(db: &WallpaperDb, cfg: &CrawlConfig) -> Result<()> {
    let settings = CrawlSettings::from_config(cfg)?;
    let http = Arc::new(CurlClient::new(&cfg.http_config()));
    let crawler = Crawler::new(settings, http, db.clone(), cfg.retry_policy());

    let out = crawler.run().await?;
    let rec = &out.record;
    println!(
        "#{}  {:04}-{:02}-{:02}  {}",
        out.id,
        rec.year,
        rec.month,
        rec.day,
        rec.title.as_deref().unwrap_or("-")
    );
    println!("saved {} ({} bytes)", out.image_path.display(), out.bytes);
    Ok(())
}
