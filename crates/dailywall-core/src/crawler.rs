//! Fetch → decode → match → download → persist, once per run.
//!
//! The whole sequence is retried by [`RetryPolicy`] when today's entry is not
//! published yet; any other failure aborts the run immediately.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};

use crate::config::CrawlConfig;
use crate::date_match::{find_today, regional_today};
use crate::http::{HttpClient, HttpRequest};
use crate::model::parse_response;
use crate::record::{WallpaperId, WallpaperRecord};
use crate::retry::{run_with_retry, RetryPolicy};
use crate::storage::prepare_destination;
use crate::store::WallpaperStore;
use crate::url_model;
use crate::CrawlError;

/// Progress of one attempt; logged at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Fetched,
    Matched,
    Downloaded,
    Persisted,
    Done,
}

/// Fixed request and output parameters for a crawl.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub api_url: String,
    pub market: String,
    pub accept_language: String,
    pub cdn_prefix: String,
    pub image_dir: PathBuf,
    pub timezone: FixedOffset,
}

impl CrawlSettings {
    pub fn from_config(cfg: &CrawlConfig) -> Result<Self> {
        Ok(Self {
            api_url: cfg.api_url.clone(),
            market: cfg.market.clone(),
            accept_language: cfg.accept_language.clone(),
            cdn_prefix: cfg.cdn_prefix.clone(),
            image_dir: cfg.resolve_image_dir()?,
            timezone: cfg.timezone()?,
        })
    }

    fn api_request(&self) -> HttpRequest {
        HttpRequest::get(&self.api_url)
            .query("mkt", &self.market)
            .header("accept-language", &self.accept_language)
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub id: WallpaperId,
    pub record: WallpaperRecord,
    pub image_url: String,
    pub image_path: PathBuf,
    pub bytes: u64,
    pub attempts: u32,
}

/// Orchestrates one crawl run against an HTTP transport and a store.
pub struct Crawler<H, S> {
    settings: CrawlSettings,
    http: Arc<H>,
    store: S,
    policy: RetryPolicy,
    clock: fn() -> DateTime<Utc>,
}

impl<H, S> Crawler<H, S>
where
    H: HttpClient + 'static,
    S: WallpaperStore,
{
    pub fn new(settings: CrawlSettings, http: Arc<H>, store: S, policy: RetryPolicy) -> Self {
        Self {
            settings,
            http,
            store,
            policy,
            clock: Utc::now,
        }
    }

    /// Replace the wall clock used to compute "today".
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the full sequence, retrying while today's wallpaper is not yet published.
    pub async fn run(&self) -> Result<CrawlOutcome, CrawlError> {
        let result = run_with_retry(&self.policy, move |attempt| self.attempt(attempt)).await;
        match &result {
            Ok(outcome) => tracing::info!(
                stage = ?Stage::Done,
                id = outcome.id,
                attempts = outcome.attempts,
                path = %outcome.image_path.display(),
                "crawl completed"
            ),
            Err(e) => tracing::error!(max_attempts = self.policy.max_attempts, "crawl failed: {:#}", e),
        }
        result
    }

    async fn attempt(&self, attempt: u32) -> Result<CrawlOutcome, CrawlError> {
        let today = regional_today(self.settings.timezone, (self.clock)());
        tracing::info!(stage = ?Stage::Start, attempt, %today, "crawl attempt");

        let request = self.settings.api_request();
        let http = Arc::clone(&self.http);
        let body = tokio::task::spawn_blocking(move || http.get(&request))
            .await
            .map_err(|e| CrawlError::Transport(format!("fetch task failed: {}", e)))??;
        tracing::debug!(stage = ?Stage::Fetched, bytes = body.len(), url = %self.settings.api_url, "api fetched");

        let response = parse_response(&body)?;
        let entry = find_today(&response, today)
            .cloned()
            .ok_or(CrawlError::NotYetUpdated(today))?;
        tracing::info!(
            stage = ?Stage::Matched,
            candidates = response.media_contents.len(),
            full_date = %entry.full_date_string,
            title = %entry.image_content.title,
            "matched today's entry"
        );

        let image = url_model::normalize(&entry.image_content.image, &self.settings.cdn_prefix)?;
        tracing::info!(url = %image.url, filename = %image.filename, "normalized image url");

        let dest = prepare_destination(&self.settings.image_dir, &image.filename)?;
        let http = Arc::clone(&self.http);
        let (url, path) = (image.url.clone(), dest.clone());
        let bytes = tokio::task::spawn_blocking(move || http.download(&url, &path))
            .await
            .map_err(|e| CrawlError::Transport(format!("download task failed: {}", e)))??;
        tracing::info!(stage = ?Stage::Downloaded, bytes, path = %dest.display(), "image saved");

        let record = WallpaperRecord::from_entry(&entry, today, image.filename);
        let id = self
            .store
            .insert(&record)
            .await
            .map_err(|e| CrawlError::Persistence(format!("{:#}", e)))?;
        tracing::info!(stage = ?Stage::Persisted, id, "record inserted");

        Ok(CrawlOutcome {
            id,
            record,
            image_url: image.url,
            image_path: dest,
            bytes,
            attempts: attempt,
        })
    }
}
