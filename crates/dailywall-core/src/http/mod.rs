//! Outbound HTTP: the API fetch and the image download.
//!
//! The orchestrator talks to [`HttpClient`]; [`CurlClient`] is the libcurl
//! implementation. Calls block the current thread, so async callers run them
//! through `spawn_blocking`.

mod curl_client;

pub use curl_client::CurlClient;

use std::path::Path;

use crate::CrawlError;

/// A GET request with query parameters and extra headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// URL with the query parameters appended (percent-encoded).
    pub fn full_url(&self) -> Result<String, CrawlError> {
        let url = url::Url::parse_with_params(&self.url, &self.query)
            .map_err(|e| CrawlError::Transport(format!("invalid URL {}: {}", self.url, e)))?;
        Ok(url.into())
    }
}

/// Blocking HTTP transport used by the crawler.
pub trait HttpClient: Send + Sync {
    /// Perform the request and return the full body. Non-2xx is `Transport`.
    fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, CrawlError>;

    /// Stream the body of `url` into `dest`. Returns bytes written.
    /// `dest` only exists afterwards if the transfer succeeded.
    fn download(&self, url: &str, dest: &Path) -> Result<u64, CrawlError>;
}
