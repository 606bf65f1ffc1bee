//! Canonical image URL and filename derivation.
//!
//! The vendor has changed its image URL scheme several times (absolute vs.
//! host-relative, resolution tokens, image format tokens). Every known
//! substitution is applied unconditionally; any one token may be absent.

mod filename;
mod sanitize;

pub use filename::filename_from_url;
pub use sanitize::sanitize_filename;

use crate::model::ImageReference;
use crate::CrawlError;

/// Legacy resolution token and its replacement.
const LEGACY_RESOLUTION: (&str, &str) = ("1920x1080", "UHD");
/// Legacy image format token and its replacement.
const LEGACY_FORMAT: (&str, &str) = ("webp", "jpg");

/// Download URL and local filename for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedImage {
    pub url: String,
    pub filename: String,
}

/// Normalize an image reference into a canonical URL and filename.
///
/// # Examples
///
/// - `/th?id=OHR.Lake_ZH-CN123_1920x1080.webp&qlt=50` with prefix `https://s.cn.bing.net/`
///   → url `https://s.cn.bing.net/th?id=OHR.Lake_ZH-CN123_UHD.jpg&qlt=50`, filename `Lake_ZH-CN123_UHD.jpg`
pub fn normalize(image: &ImageReference, cdn_prefix: &str) -> Result<NormalizedImage, CrawlError> {
    let url = canonical_url(&image.url, cdn_prefix);
    let filename = filename_from_url(&url)?;
    Ok(NormalizedImage { url, filename })
}

/// Apply token substitutions and qualify host-relative URLs with `cdn_prefix`.
pub fn canonical_url(raw: &str, cdn_prefix: &str) -> String {
    let url = raw
        .trim()
        .replace(LEGACY_RESOLUTION.0, LEGACY_RESOLUTION.1)
        .replace(LEGACY_FORMAT.0, LEGACY_FORMAT.1);
    if is_absolute(&url) {
        return url;
    }
    format!(
        "{}/{}",
        cdn_prefix.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
