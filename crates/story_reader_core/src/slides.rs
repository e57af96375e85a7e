//! crates/story_reader_core/src/slides.rs
//!
//! Tracks the reader's position within a story.
//!
//! A deck over `n` content pages has `n + 1` stops: indices `0..n` are the pages
//! and index `n` is the trailing feedback stop. There is no separate cover stop;
//! the progress dots, the next/prev bounds and the page label all count the same
//! `n + 1` stops.

use serde::Serialize;

/// The stop the reader is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum Slide {
    Content(usize),
    Feedback,
}

/// A 1-based "page X of Y" snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    pub fn label(&self) -> String {
        format!("Sayfa {} / {}", self.position, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDeck {
    page_count: usize,
    current: usize,
}

impl SlideDeck {
    /// Creates a deck positioned at the first stop.
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            current: 0,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Number of navigable stops, including the feedback stop.
    pub fn total_stops(&self) -> usize {
        self.page_count + 1
    }

    pub fn max_index(&self) -> usize {
        self.page_count
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Slide {
        if self.is_feedback() {
            Slide::Feedback
        } else {
            Slide::Content(self.current)
        }
    }

    pub fn is_feedback(&self) -> bool {
        self.current == self.page_count
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.max_index()
    }

    pub fn can_go_prev(&self) -> bool {
        self.current > 0
    }

    /// Advances one stop. Returns whether the position changed.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Steps back one stop. The feedback stop does not lock navigation.
    pub fn prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jumps to `index`, clamped into range. Returns whether the position changed.
    pub fn jump_to(&mut self, index: usize) -> bool {
        let target = index.min(self.max_index());
        let changed = target != self.current;
        self.current = target;
        changed
    }

    /// Starts over on a new story with `page_count` pages.
    pub fn reset(&mut self, page_count: usize) {
        self.page_count = page_count;
        self.current = 0;
    }

    pub fn progress(&self) -> Progress {
        Progress {
            position: self.current + 1,
            total: self.total_stops(),
        }
    }

    /// One flag per stop for the progress indicator; `true` marks the active stop.
    pub fn dots(&self) -> Vec<bool> {
        (0..self.total_stops()).map(|i| i == self.current).collect()
    }
}
