//! crates/story_reader_core/src/layout.rs
//!
//! Chooses how a single page is arranged on screen and resolves the image paths it
//! references.

use crate::domain::Page;
use serde::Serialize;

/// Image shown in place of any page or cover illustration that fails to load.
pub const PLACEHOLDER_IMAGE: &str = "/static/story-placeholder.png";

/// One of the four text/image arrangements used when a page has both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    ImageLeftTextRight,
    TextLeftImageRight,
    TextTopImageBottom,
    ImageTopTextBottom,
}

const LAYOUT_ROTATION: [LayoutVariant; 4] = [
    LayoutVariant::ImageLeftTextRight,
    LayoutVariant::TextLeftImageRight,
    LayoutVariant::TextTopImageBottom,
    LayoutVariant::ImageTopTextBottom,
];

/// Picks the arrangement for the page at `page_index`, cycling every four pages.
pub fn select_layout(page_index: usize) -> LayoutVariant {
    LAYOUT_ROTATION[page_index % LAYOUT_ROTATION.len()]
}

/// Background paper tint, rotated per page like the layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperStyle {
    Cream,
    PaleYellow,
    Grey,
    LightBeige,
}

const PAPER_ROTATION: [PaperStyle; 4] = [
    PaperStyle::Cream,
    PaperStyle::PaleYellow,
    PaperStyle::Grey,
    PaperStyle::LightBeige,
];

pub fn paper_style(page_index: usize) -> PaperStyle {
    PAPER_ROTATION[page_index % PAPER_ROTATION.len()]
}

//=========================================================================================
// Page Arrangement
//=========================================================================================

/// How a page's content is laid out. Only pages with both text and an image
/// rotate through the layout variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageArrangement {
    Dual {
        variant: LayoutVariant,
        text: String,
        image: ImageRef,
    },
    TextOnly {
        text: String,
    },
    ImageOnly {
        image: ImageRef,
    },
    Html {
        html: String,
    },
    Empty,
}

impl PageArrangement {
    pub fn for_page(page: &Page, page_index: usize, base_url: &str) -> Self {
        if let Page::Legacy { content } = page {
            return PageArrangement::Html {
                html: content.clone(),
            };
        }

        match (page.text(), page.image()) {
            (Some(text), Some(image)) => PageArrangement::Dual {
                variant: select_layout(page_index),
                text: text.to_string(),
                image: ImageRef::resolve(base_url, image),
            },
            (Some(text), None) => PageArrangement::TextOnly {
                text: text.to_string(),
            },
            (None, Some(image)) => PageArrangement::ImageOnly {
                image: ImageRef::resolve(base_url, image),
            },
            (None, None) => PageArrangement::Empty,
        }
    }
}

//=========================================================================================
// Images
//=========================================================================================

/// A resolved image reference that swaps to the placeholder once it is reported
/// broken. Each image element owns its own fallback state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    url: String,
    fallback: String,
    broken: bool,
}

impl ImageRef {
    /// Joins a relative API path onto the base URL by plain concatenation.
    pub fn resolve(base_url: &str, path: &str) -> Self {
        Self {
            url: format!("{}{}", base_url, path),
            fallback: format!("{}{}", base_url, PLACEHOLDER_IMAGE),
            broken: false,
        }
    }

    /// The URL that should currently be displayed.
    pub fn src(&self) -> &str {
        if self.broken {
            &self.fallback
        } else {
            &self.url
        }
    }

    pub fn original(&self) -> &str {
        &self.url
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    /// Records a load failure. Later calls are no-ops, so a broken placeholder
    /// never triggers another swap.
    pub fn mark_broken(&mut self) {
        self.broken = true;
    }
}
