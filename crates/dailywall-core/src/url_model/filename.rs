//! Filename extraction from the vendor's `th?id=...&...` image URLs.

use super::sanitize::sanitize_filename;
use crate::CrawlError;

/// Vendor prefix stripped from the id value.
const VENDOR_PREFIX: &str = "OHR.";

/// Derives the local filename from a canonical image URL.
///
/// Takes the part before the first `&`, then the value of its first
/// `=`-delimited parameter, then strips a leading `OHR.`.
pub fn filename_from_url(url: &str) -> Result<String, CrawlError> {
    let unparseable = || CrawlError::UnparseableUrl(url.to_string());

    let (head, _) = url.split_once('&').ok_or_else(unparseable)?;
    let value = head.split('=').nth(1).ok_or_else(unparseable)?;
    let value = value.strip_prefix(VENDOR_PREFIX).unwrap_or(value);

    let name = sanitize_filename(value);
    if name.is_empty() || name == "." || name == ".." {
        return Err(unparseable());
    }
    Ok(name)
}
