//! In-memory model of the image-of-the-day API payload.
//!
//! The wire format uses PascalCase keys nested as
//! `MediaContents[].ImageContent.Image`. Decoding walks the JSON tree
//! explicitly: missing string fields become `""`, missing nested objects
//! are a [`CrawlError::MalformedResponse`](crate::CrawlError).

mod decode;

pub use decode::{decode_response, parse_response};

/// Raw image reference as sent by the vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub url: String,
    pub wallpaper: String,
    pub downloadable: bool,
}

/// Descriptive block for one day's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContent {
    pub description: String,
    pub headline: String,
    pub title: String,
    pub copyright: String,
    /// Opaque id that embeds the entry's date (e.g. `HPQuiz_20240115_Name`).
    pub trivia_id: String,
    pub image: ImageReference,
}

/// One candidate entry in the rolling window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub image_content: ImageContent,
    /// Human date in the vendor's regional format (e.g. `2024 01月 15`).
    pub full_date_string: String,
    pub ssd: String,
}

/// All entries returned by one API call, in vendor order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    pub media_contents: Vec<MediaEntry>,
}
