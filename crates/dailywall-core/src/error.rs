//! Error taxonomy for one crawl run.

use thiserror::Error;

/// Failure of a single crawl attempt.
///
/// Only [`CrawlError::NotYetUpdated`] is transient; every other variant aborts
/// the run without retry.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Network failure or non-2xx status on the API fetch or the image download.
    #[error("transport: {0}")]
    Transport(String),
    /// Vendor payload is missing a required nested object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// No candidate entry carries today's date yet.
    #[error("wallpaper not yet updated for {0}")]
    NotYetUpdated(chrono::NaiveDate),
    /// Image URL has no `&` segment or no `=` parameter.
    #[error("unparseable image url: {0}")]
    UnparseableUrl(String),
    /// Local file write failed while saving the image.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// Inserting the record into the store failed.
    #[error("persistence: {0}")]
    Persistence(String),
}

impl CrawlError {
    pub fn is_transient(&self) -> bool {
        matches!(self, CrawlError::NotYetUpdated(_))
    }
}

impl From<curl::Error> for CrawlError {
    fn from(e: curl::Error) -> Self {
        CrawlError::Transport(e.to_string())
    }
}
