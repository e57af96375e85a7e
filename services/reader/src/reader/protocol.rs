//! services/reader/src/reader/protocol.rs
//!
//! Defines the events the reader emits towards whatever hosts it (a terminal,
//! a browser shell, a test). The reader never navigates by itself; it asks.

use serde::Serialize;
use story_reader_core::domain::StoryId;

/// Shown when a story cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Hikaye yüklenirken bir hata oluştu.";
/// Shown after a like or dislike is recorded.
pub const FEEDBACK_SAVED_MESSAGE: &str = "Geri bildiriminiz kaydedildi";
/// Shown when recording feedback fails. Navigation proceeds regardless.
pub const FEEDBACK_FAILED_MESSAGE: &str = "Geri bildiriminiz kaydedilirken bir hata oluştu";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Represents the structured messages the reader sends to its host.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReaderEvent {
    /// A story finished loading and the deck is positioned on its first stop.
    StoryLoaded {
        story_id: StoryId,
        title: String,
        total_slides: usize,
    },

    /// Loading failed. The host should show the message and offer a retry.
    LoadFailed { story_id: StoryId, message: String },

    /// A transient acknowledgment, e.g. a toast.
    Notice { level: NoticeLevel, message: String },

    /// Leave the reader for the given client-side route.
    Navigate { route: String },

    /// Go back one step in browsing history.
    NavigateBack,
}
