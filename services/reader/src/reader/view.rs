//! services/reader/src/reader/view.rs
//!
//! Render snapshots. Presenters draw from these and never touch the live state.

use super::state::{FeedbackState, ReaderSession, ReaderState};
use serde::Serialize;
use story_reader_core::{
    layout::{paper_style, ImageRef, PageArrangement, PaperStyle},
    slides::{Progress, Slide},
    theme::ThemeDescriptor,
};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReaderView {
    Idle,
    Loading,
    Failed { message: String },
    Ready(SlideView),
}

#[derive(Debug, Clone, Serialize)]
pub struct SlideView {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub age_group: Option<String>,
    pub tags: Vec<String>,
    pub likes: i64,
    /// Estimated reading time in minutes.
    pub read_time: Option<u32>,
    pub cover: Option<ImageRef>,
    pub theme: ThemeDescriptor,
    pub progress: Progress,
    /// One entry per stop; `true` marks the current one.
    pub dots: Vec<bool>,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub body: SlideBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideBody {
    Page {
        /// 1-based page number printed in the corner.
        number: usize,
        paper: PaperStyle,
        arrangement: PageArrangement,
    },
    Feedback {
        enabled: bool,
    },
}

impl From<&ReaderState> for ReaderView {
    fn from(state: &ReaderState) -> Self {
        match state {
            ReaderState::Idle => ReaderView::Idle,
            ReaderState::Loading { .. } => ReaderView::Loading,
            ReaderState::Failed { message, .. } => ReaderView::Failed {
                message: message.clone(),
            },
            ReaderState::Ready(session) => ReaderView::Ready(SlideView::from(&**session)),
        }
    }
}

impl From<&ReaderSession> for SlideView {
    fn from(session: &ReaderSession) -> Self {
        let deck = &session.deck;
        let body = match deck.current_slide() {
            Slide::Content(index) => SlideBody::Page {
                number: index + 1,
                paper: paper_style(index),
                arrangement: session
                    .arrangements
                    .get(index)
                    .cloned()
                    .unwrap_or(PageArrangement::Empty),
            },
            Slide::Feedback => SlideBody::Feedback {
                enabled: session.feedback == FeedbackState::Idle,
            },
        };

        let story = &session.story;
        Self {
            title: story.title.clone(),
            description: story.description.clone(),
            category: story.category.clone(),
            age_group: story.age_group.clone(),
            tags: story.tags.iter().map(|t| t.name.clone()).collect(),
            likes: story.likes,
            read_time: story.read_time,
            cover: session.cover.clone(),
            theme: session.theme,
            progress: deck.progress(),
            dots: deck.dots(),
            can_go_prev: deck.can_go_prev(),
            can_go_next: deck.can_go_next(),
            body,
        }
    }
}
