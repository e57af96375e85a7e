//! crates/story_reader_core/src/content.rs
//!
//! Normalizes a story's raw `content` field into an ordered list of pages.
//!
//! Stored content is either a JSON array of page objects or a single legacy HTML
//! blob. Nothing marks which one it is, so the parser tries JSON first and falls
//! back to treating the whole string as one HTML page. Broken JSON is therefore
//! indistinguishable from HTML and is rendered as such.

use crate::domain::Page;
use serde_json::Value;
use tracing::debug;

/// Parses raw story content into pages. Never fails.
pub fn parse_content(raw: Option<&str>) -> Vec<Page> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.iter().map(page_from_value).collect(),
        Ok(_) => {
            debug!("Story content is JSON but not an array, rendering as a single page.");
            vec![Page::legacy(raw)]
        }
        Err(_) => {
            debug!("Story content is not JSON, rendering as a single HTML page.");
            vec![Page::legacy(raw)]
        }
    }
}

// Array elements are taken at face value: string fields are kept, anything else is
// treated as missing. An element carrying only an HTML `content` string is the
// legacy shape embedded in an array.
fn page_from_value(value: &Value) -> Page {
    let field = |name: &str| value.get(name).and_then(Value::as_str);

    match (field("text"), field("image"), field("content")) {
        (None, None, Some(html)) => Page::legacy(html),
        (text, image, _) => Page::rich(text, image),
    }
}
