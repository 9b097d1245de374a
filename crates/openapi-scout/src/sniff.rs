//! Decide whether a fetched body is a JSON document or opaque text.

use serde_json::Value;

/// Classification of a successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Sniffed {
    ParsedObject(Value),
    RawText(String),
}

/// Classify `body` given its declared content type.
///
/// Never fails: a body that claims JSON but does not parse degrades to
/// [`Sniffed::RawText`].
pub fn classify(content_type: Option<&str>, body: &str) -> Sniffed {
    if content_type.is_some_and(is_json_media_type) {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            return Sniffed::ParsedObject(value);
        }
    }

    // Servers often label specs text/plain or octet-stream.
    if body.trim_start().starts_with('{') {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            return Sniffed::ParsedObject(value);
        }
    }

    Sniffed::RawText(body.to_string())
}

/// `application/json` or any `+json` suffix, parameters ignored.
pub fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}
