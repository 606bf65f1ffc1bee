//! libcurl-backed [`HttpClient`].

use std::io;
use std::path::Path;
use std::time::Duration;

use curl::easy::{Easy, List};

use super::{HttpClient, HttpRequest};
use crate::config::HttpConfig;
use crate::storage::ImageWriter;
use crate::CrawlError;

/// Blocking curl client with bounded connect/total timeouts.
#[derive(Debug, Clone)]
pub struct CurlClient {
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for CurlClient {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl CurlClient {
    pub fn new(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }

    fn easy(&self, url: &str, headers: &[(String, String)]) -> Result<Easy, CrawlError> {
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        if !headers.is_empty() {
            let mut list = List::new();
            for (k, v) in headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(easy)
    }
}

fn check_status(easy: &mut Easy, url: &str) -> Result<(), CrawlError> {
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(CrawlError::Transport(format!("GET {} returned HTTP {}", url, code)));
    }
    Ok(())
}

impl HttpClient for CurlClient {
    fn get(&self, request: &HttpRequest) -> Result<Vec<u8>, CrawlError> {
        let url = request.full_url()?;
        let mut easy = self.easy(&url, &request.headers)?;
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer
                .perform()
                .map_err(|e| CrawlError::Transport(format!("GET {} failed: {}", url, e)))?;
        }
        check_status(&mut easy, &url)?;
        tracing::debug!(url = %url, bytes = body.len(), "GET completed");
        Ok(body)
    }

    fn download(&self, url: &str, dest: &Path) -> Result<u64, CrawlError> {
        let mut easy = self.easy(url, &[])?;
        let mut writer = ImageWriter::create(dest)?;
        let mut write_err: Option<io::Error> = None;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match writer.write_chunk(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    tracing::warn!("image write failed: {}", e);
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            let performed = transfer.perform();
            drop(transfer);
            if let Some(e) = write_err.take() {
                return Err(CrawlError::Storage(e));
            }
            performed.map_err(|e| CrawlError::Transport(format!("GET {} failed: {}", url, e)))?;
        }
        check_status(&mut easy, url)?;
        let written = writer.bytes_written();
        writer.finalize()?;
        Ok(written)
    }
}
