//! Normalized row persisted once per successful run.

use chrono::{Datelike, NaiveDate};

use crate::model::MediaEntry;

/// Stored record identifier.
pub type WallpaperId = i64;

/// Row to insert; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperRecord {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub headline: Option<String>,
    pub title: Option<String>,
    pub copyright: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Canonical image filename.
    pub image: String,
}

/// A persisted record as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredWallpaper {
    pub id: WallpaperId,
    pub record: WallpaperRecord,
}

impl WallpaperRecord {
    /// Build the row for `entry`. The date comes from the Trivia ID when it
    /// embeds one, otherwise from `matched_date`.
    pub fn from_entry(entry: &MediaEntry, matched_date: NaiveDate, image: String) -> Self {
        let content = &entry.image_content;
        let date = date_from_trivia_id(&content.trivia_id).unwrap_or(matched_date);
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            headline: non_empty(&content.headline),
            title: non_empty(&content.title),
            copyright: non_empty(&content.copyright),
            description: non_empty(&content.description),
            location: None,
            image,
        }
    }
}

/// Date embedded in a Trivia ID: the first `_`-separated segment that starts
/// with eight digits forming a valid `YYYYMMDD`.
///
/// `HPQuiz_20240115_GlacierLake` and `OHR.Name_ZH-CN123_20240115` both yield 2024-01-15.
pub fn date_from_trivia_id(trivia_id: &str) -> Option<NaiveDate> {
    trivia_id.split('_').find_map(|segment| {
        let digits = segment.get(..8)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
    })
}

/// Empty or whitespace-only strings become `None`.
fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
