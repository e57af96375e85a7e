//! services/reader/src/reader/state.rs
//!
//! Defines the reader's settings and its per-story session state.

use crate::config::Config;
use std::time::Duration;
use story_reader_core::{
    content::parse_content,
    domain::{FeedbackKind, Page, Story, StoryId},
    layout::{ImageRef, PageArrangement},
    slides::SlideDeck,
    theme::{resolve_theme, ThemeDescriptor},
};

//=========================================================================================
// ReaderSettings (Shared Across All Sessions)
//=========================================================================================

/// The subset of configuration the reader itself needs.
#[derive(Debug, Clone)]
pub struct ReaderSettings {
    /// Prefix for relative image paths.
    pub image_base_url: String,
    /// Route requested after feedback is submitted.
    pub listing_route: String,
    /// Pause between the feedback notice and navigating away.
    pub feedback_delay: Duration,
}

impl From<&Config> for ReaderSettings {
    fn from(config: &Config) -> Self {
        Self {
            image_base_url: config.api_base_url.clone(),
            listing_route: config.listing_route.clone(),
            feedback_delay: config.feedback_redirect_delay,
        }
    }
}

//=========================================================================================
// ReaderState (One Per Mounted Reader)
//=========================================================================================

/// Where the reader is in its lifecycle.
#[derive(Debug, Default)]
pub enum ReaderState {
    /// Nothing mounted.
    #[default]
    Idle,
    Loading {
        story_id: StoryId,
    },
    Ready(Box<ReaderSession>),
    /// The fetch failed; only a manual retry leaves this state.
    Failed {
        story_id: StoryId,
        message: String,
    },
}

impl ReaderState {
    pub fn story_id(&self) -> Option<&StoryId> {
        match self {
            ReaderState::Idle => None,
            ReaderState::Loading { story_id } | ReaderState::Failed { story_id, .. } => {
                Some(story_id)
            }
            ReaderState::Ready(session) => Some(&session.story.id),
        }
    }
}

/// Whether a like/dislike request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    Idle,
    Submitting(FeedbackKind),
}

/// Identifies an image element whose load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Cover,
    Page(usize),
}

/// Everything derived from one loaded story. Built once per fetch and discarded
/// when another story is opened or the reader closes.
#[derive(Debug)]
pub struct ReaderSession {
    pub story: Story,
    pub pages: Vec<Page>,
    pub arrangements: Vec<PageArrangement>,
    pub cover: Option<ImageRef>,
    pub theme: ThemeDescriptor,
    pub deck: SlideDeck,
    pub feedback: FeedbackState,
}

impl ReaderSession {
    pub fn new(story: Story, image_base_url: &str) -> Self {
        let pages = parse_content(story.content.as_deref());
        let arrangements = pages
            .iter()
            .enumerate()
            .map(|(index, page)| PageArrangement::for_page(page, index, image_base_url))
            .collect();
        let cover = story
            .image
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| ImageRef::resolve(image_base_url, path));
        let theme = resolve_theme(story.category.as_deref());
        let deck = SlideDeck::new(pages.len());

        Self {
            story,
            pages,
            arrangements,
            cover,
            theme,
            deck,
            feedback: FeedbackState::Idle,
        }
    }

    /// Swaps a broken image for the placeholder. Returns `false` if the target
    /// has no image.
    pub fn mark_image_broken(&mut self, target: ImageTarget) -> bool {
        let image = match target {
            ImageTarget::Cover => self.cover.as_mut(),
            ImageTarget::Page(index) => match self.arrangements.get_mut(index) {
                Some(PageArrangement::Dual { image, .. })
                | Some(PageArrangement::ImageOnly { image }) => Some(image),
                _ => None,
            },
        };

        match image {
            Some(image) => {
                image.mark_broken();
                true
            }
            None => false,
        }
    }
}
