//! crates/story_reader_core/src/ports.rs
//!
//! Defines the service contracts (traits) the reader depends on.
//! The Story API lives behind these traits so the reader logic stays independent of
//! any particular HTTP client.

use crate::domain::{FeedbackKind, Story, StoryCollection, StoryId};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, decoding).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The curated story lists offered by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Featured,
    New,
    Popular,
}

impl CollectionKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            CollectionKind::Featured => "featured",
            CollectionKind::New => "new",
            CollectionKind::Popular => "popular",
        }
    }
}

#[async_trait]
pub trait StoryService: Send + Sync {
    /// Fetches a single story, including its raw content.
    async fn get_story(&self, story_id: &StoryId) -> PortResult<Story>;

    /// Records a like or dislike for a story. The response body is ignored.
    async fn submit_feedback(&self, story_id: &StoryId, kind: FeedbackKind) -> PortResult<()>;

    /// Lists one of the curated collections.
    async fn list_collection(
        &self,
        kind: CollectionKind,
        limit: u32,
    ) -> PortResult<StoryCollection>;
}
