//! Selects today's entry from the API's rolling window.
//!
//! The "today" entry is not guaranteed to be first, so every candidate's
//! `FullDateString` is parsed and compared against the regional date.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::model::{ApiResponse, MediaEntry};

/// Formats accepted for `FullDateString`, tried in order. The first is the
/// zh-CN market format (`2024 01月 15`).
const FULL_DATE_FORMATS: &[&str] = &["%Y %m月 %d", "%B %d, %Y", "%Y%m%d"];

/// Calendar date of `now` in the regional timezone.
pub fn regional_today(tz: FixedOffset, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Parse a vendor date string; `None` if no known format matches.
pub fn parse_full_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    FULL_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// First entry whose date equals `today`, scanning in vendor order.
///
/// Entries with unparseable dates are skipped.
pub fn find_today(response: &ApiResponse, today: NaiveDate) -> Option<&MediaEntry> {
    response.media_contents.iter().find(|entry| {
        match parse_full_date(&entry.full_date_string) {
            Some(d) => d == today,
            None => {
                tracing::debug!(
                    full_date = %entry.full_date_string,
                    "skipping entry with unparseable date"
                );
                false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageContent, ImageReference};
    use chrono::TimeZone;

    fn entry(date: &str, title: &str) -> MediaEntry {
        MediaEntry {
            image_content: ImageContent {
                description: String::new(),
                headline: String::new(),
                title: title.to_string(),
                copyright: String::new(),
                trivia_id: String::new(),
                image: ImageReference {
                    url: String::new(),
                    wallpaper: String::new(),
                    downloadable: false,
                },
            },
            full_date_string: date.to_string(),
            ssd: String::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_vendor_format() {
        assert_eq!(parse_full_date("2024 01月 15"), Some(day(2024, 1, 15)));
        assert_eq!(parse_full_date("2024 1月 5"), Some(day(2024, 1, 5)));
        assert_eq!(parse_full_date(" 2023 12月 31 "), Some(day(2023, 12, 31)));
        assert_eq!(parse_full_date("January 15, 2024"), Some(day(2024, 1, 15)));
        assert_eq!(parse_full_date(""), None);
        assert_eq!(parse_full_date("yesterday"), None);
    }

    #[test]
    fn finds_today_when_not_first() {
        let resp = ApiResponse {
            media_contents: vec![
                entry("2024 01月 14", "yesterday"),
                entry("2024 01月 15", "today"),
                entry("2024 01月 13", "older"),
            ],
        };
        let hit = find_today(&resp, day(2024, 1, 15)).unwrap();
        assert_eq!(hit.image_content.title, "today");
    }

    #[test]
    fn first_match_wins() {
        let resp = ApiResponse {
            media_contents: vec![
                entry("garbage", "bad"),
                entry("2024 01月 15", "first"),
                entry("2024 01月 15", "second"),
            ],
        };
        let hit = find_today(&resp, day(2024, 1, 15)).unwrap();
        assert_eq!(hit.image_content.title, "first");
    }

    #[test]
    fn no_match_reports_none() {
        let resp = ApiResponse {
            media_contents: vec![entry("2024 01月 14", "a"), entry("2024 01月 13", "b")],
        };
        assert!(find_today(&resp, day(2024, 1, 15)).is_none());
        assert!(find_today(&ApiResponse::default(), day(2024, 1, 15)).is_none());
    }

    #[test]
    fn regional_today_crosses_midnight() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        // 2024-01-14 17:30 UTC is already 01:30 on the 15th at UTC+8.
        let now = Utc.with_ymd_and_hms(2024, 1, 14, 17, 30, 0).unwrap();
        assert_eq!(regional_today(tz, now), day(2024, 1, 15));
        let earlier = Utc.with_ymd_and_hms(2024, 1, 14, 15, 59, 0).unwrap();
        assert_eq!(regional_today(tz, earlier), day(2024, 1, 14));
    }
}
