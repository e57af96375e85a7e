//! crates/story_reader_core/src/domain.rs
//!
//! Defines the core data structures the reader works with.
//! These mirror the records served by the Story API; the reader never mutates them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Identifiers
//=========================================================================================

/// A story identifier as served by the API. Older records use integers, newer ones
/// may use opaque strings; both appear verbatim in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoryId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryId::Numeric(n) => write!(f, "{}", n),
            StoryId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for StoryId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(n) => StoryId::Numeric(n),
            Err(_) => StoryId::Text(trimmed.to_string()),
        })
    }
}

impl From<i64> for StoryId {
    fn from(value: i64) -> Self {
        StoryId::Numeric(value)
    }
}

impl From<&str> for StoryId {
    fn from(value: &str) -> Self {
        StoryId::Text(value.to_string())
    }
}

//=========================================================================================
// Stories
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
}

/// A full story record as returned by the story-detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    /// Relative path to the cover image.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Raw page content: a JSON-encoded page array or a legacy HTML blob.
    #[serde(default, deserialize_with = "raw_content")]
    pub content: Option<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub author: Option<Author>,
}

/// One entry of a story collection listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorySummary {
    pub id: StoryId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryCollection {
    pub total: u64,
    pub stories: Vec<StorySummary>,
}

// The API normally sends `content` as a string, but some responses carry the page
// array already decoded. Re-encode those so the parser sees a single representation.
fn raw_content<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

//=========================================================================================
// Pages
//=========================================================================================

/// One unit of story content, resolved once at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Page {
    /// Text and/or an illustration. Either field may be absent.
    Rich {
        text: Option<String>,
        image: Option<String>,
    },
    /// A raw HTML fragment from stories written before paged content existed.
    Legacy { content: String },
}

impl Page {
    pub fn rich(text: Option<&str>, image: Option<&str>) -> Self {
        Page::Rich {
            text: text.map(str::to_string),
            image: image.map(str::to_string),
        }
    }

    pub fn legacy(content: impl Into<String>) -> Self {
        Page::Legacy {
            content: content.into(),
        }
    }

    /// Non-blank text of a rich page.
    pub fn text(&self) -> Option<&str> {
        match self {
            Page::Rich { text: Some(t), .. } if !t.trim().is_empty() => Some(t.as_str()),
            _ => None,
        }
    }

    /// Non-empty image path of a rich page.
    pub fn image(&self) -> Option<&str> {
        match self {
            Page::Rich { image: Some(i), .. } if !i.is_empty() => Some(i.as_str()),
            _ => None,
        }
    }
}

//=========================================================================================
// Feedback
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Like,
    Dislike,
}

impl FeedbackKind {
    /// The trailing path segment of the feedback endpoint.
    pub fn path_segment(self) -> &'static str {
        match self {
            FeedbackKind::Like => "like",
            FeedbackKind::Dislike => "dislike",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_id_accepts_numbers_and_strings() {
        let numeric: StoryId = serde_json::from_str("42").unwrap();
        let text: StoryId = serde_json::from_str("\"abc-1\"").unwrap();
        assert_eq!(numeric, StoryId::Numeric(42));
        assert_eq!(text, StoryId::Text("abc-1".into()));
        assert_eq!("17".parse::<StoryId>().unwrap(), StoryId::Numeric(17));
        assert_eq!(numeric.to_string(), "42");
    }

    #[test]
    fn story_content_accepts_pre_decoded_arrays() {
        let story: Story = serde_json::from_str(
            r#"{"id":1,"title":"T","content":[{"text":"a","image":null}]}"#,
        )
        .unwrap();
        let reencoded: serde_json::Value =
            serde_json::from_str(story.content.as_deref().unwrap()).unwrap();
        assert_eq!(reencoded, serde_json::json!([{ "text": "a", "image": null }]));
    }

    #[test]
    fn story_tolerates_missing_optional_fields() {
        let story: Story = serde_json::from_str(r#"{"id":"x","title":"T"}"#).unwrap();
        assert!(story.content.is_none());
        assert!(story.category.is_none());
        assert!(story.tags.is_empty());
    }

    #[test]
    fn blank_text_is_not_text() {
        let page = Page::rich(Some("   "), Some(""));
        assert_eq!(page.text(), None);
        assert_eq!(page.image(), None);
        assert_eq!(Page::legacy("<p>x</p>").text(), None);
    }
}
