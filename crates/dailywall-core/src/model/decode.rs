//! Field-by-field decoding of the vendor JSON tree.

use serde_json::{Map, Value};

use super::{ApiResponse, ImageContent, ImageReference, MediaEntry};
use crate::CrawlError;

type Object = Map<String, Value>;

/// Parse a raw response body and decode it into an [`ApiResponse`].
pub fn parse_response(body: &[u8]) -> Result<ApiResponse, CrawlError> {
    let root: Value = serde_json::from_slice(body)
        .map_err(|e| CrawlError::MalformedResponse(format!("invalid JSON: {}", e)))?;
    decode_response(&root)
}

/// Decode an already-parsed JSON tree. Unknown keys are ignored.
pub fn decode_response(root: &Value) -> Result<ApiResponse, CrawlError> {
    let root = as_object(root, "response root")?;
    let entries = root
        .get("MediaContents")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("MediaContents", "response root"))?;

    let media_contents = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| decode_media_entry(entry, i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse { media_contents })
}

fn decode_media_entry(value: &Value, index: usize) -> Result<MediaEntry, CrawlError> {
    let ctx = format!("MediaContents[{}]", index);
    let obj = as_object(value, &ctx)?;
    let image_content = decode_image_content(required_object(obj, "ImageContent", &ctx)?, &ctx)?;
    Ok(MediaEntry {
        image_content,
        full_date_string: string_field(obj, "FullDateString"),
        ssd: string_field(obj, "Ssd"),
    })
}

fn decode_image_content(obj: &Object, parent: &str) -> Result<ImageContent, CrawlError> {
    let ctx = format!("{}.ImageContent", parent);
    let image = decode_image(required_object(obj, "Image", &ctx)?);
    Ok(ImageContent {
        description: string_field(obj, "Description"),
        headline: string_field(obj, "Headline"),
        title: string_field(obj, "Title"),
        copyright: string_field(obj, "Copyright"),
        trivia_id: string_field(obj, "TriviaId"),
        image,
    })
}

fn decode_image(obj: &Object) -> ImageReference {
    ImageReference {
        url: string_field(obj, "Url"),
        wallpaper: string_field(obj, "Wallpaper"),
        downloadable: obj
            .get("Downloadable")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn as_object<'a>(value: &'a Value, ctx: &str) -> Result<&'a Object, CrawlError> {
    value
        .as_object()
        .ok_or_else(|| CrawlError::MalformedResponse(format!("{} is not an object", ctx)))
}

fn required_object<'a>(obj: &'a Object, key: &str, ctx: &str) -> Result<&'a Object, CrawlError> {
    obj.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| missing(key, ctx))
}

fn missing(key: &str, ctx: &str) -> CrawlError {
    CrawlError::MalformedResponse(format!("{} missing or not structured in {}", key, ctx))
}

/// String value of `key`; absent or null yields `""`, scalars are stringified.
fn string_field(obj: &Object, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "MediaContents": [
                {
                    "ImageContent": {
                        "Description": "A glacier lake at dawn.",
                        "Image": {
                            "Url": "/th?id=OHR.GlacierLake_ZH-CN1234567890_1920x1080.webp&qlt=50",
                            "Wallpaper": "/th?id=OHR.GlacierLake_ZH-CN1234567890_1920x1200.jpg&rf=LaDigue_1920x1200.jpg",
                            "Downloadable": true
                        },
                        "Headline": "Cold light",
                        "Title": "Glacier lake",
                        "Copyright": "© Someone/Getty Images",
                        "TriviaId": "HPQuiz_20240115_GlacierLake",
                        "QuickFact": { "MainText": "ignored" }
                    },
                    "Ssd": "20240114_1600",
                    "FullDateString": "2024 01月 15",
                    "AudioContent": null
                }
            ],
            "Unrelated": 1
        })
    }

    #[test]
    fn decodes_known_fields_and_ignores_unknown() {
        let resp = decode_response(&sample()).unwrap();
        assert_eq!(resp.media_contents.len(), 1);
        let entry = &resp.media_contents[0];
        assert_eq!(entry.full_date_string, "2024 01月 15");
        assert_eq!(entry.ssd, "20240114_1600");
        let content = &entry.image_content;
        assert_eq!(content.title, "Glacier lake");
        assert_eq!(content.headline, "Cold light");
        assert_eq!(content.trivia_id, "HPQuiz_20240115_GlacierLake");
        assert!(content.image.downloadable);
        assert!(content.image.url.starts_with("/th?id=OHR.GlacierLake"));
    }

    #[test]
    fn missing_strings_default_to_empty() {
        let v = json!({
            "MediaContents": [
                { "ImageContent": { "Image": {}, "Copyright": null } }
            ]
        });
        let resp = decode_response(&v).unwrap();
        let entry = &resp.media_contents[0];
        assert_eq!(entry.full_date_string, "");
        assert_eq!(entry.image_content.copyright, "");
        assert_eq!(entry.image_content.description, "");
        assert_eq!(entry.image_content.image.url, "");
        assert!(!entry.image_content.image.downloadable);
    }

    #[test]
    fn missing_media_contents_is_malformed() {
        let err = decode_response(&json!({ "Other": [] })).unwrap_err();
        assert!(matches!(err, CrawlError::MalformedResponse(_)));
        let err = decode_response(&json!({ "MediaContents": {} })).unwrap_err();
        assert!(matches!(err, CrawlError::MalformedResponse(_)));
    }

    #[test]
    fn missing_image_block_is_malformed() {
        let v = json!({
            "MediaContents": [ { "ImageContent": { "Title": "x" } } ]
        });
        match decode_response(&v).unwrap_err() {
            CrawlError::MalformedResponse(msg) => assert!(msg.contains("Image")),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
        let v = json!({ "MediaContents": [ { "Ssd": "x" } ] });
        assert!(matches!(
            decode_response(&v).unwrap_err(),
            CrawlError::MalformedResponse(_)
        ));
    }

    #[test]
    fn invalid_json_body_is_malformed() {
        assert!(matches!(
            parse_response(b"<html>").unwrap_err(),
            CrawlError::MalformedResponse(_)
        ));
        let body = serde_json::to_vec(&sample()).unwrap();
        assert_eq!(parse_response(&body).unwrap().media_contents.len(), 1);
    }

    #[test]
    fn empty_entries_list_decodes() {
        let resp = decode_response(&json!({ "MediaContents": [] })).unwrap();
        assert!(resp.media_contents.is_empty());
    }
}
