pub mod content;
pub mod domain;
pub mod layout;
pub mod ports;
pub mod slides;
pub mod theme;

pub use content::parse_content;
pub use domain::{Author, FeedbackKind, Page, Story, StoryCollection, StoryId, StorySummary, Tag};
pub use layout::{paper_style, select_layout, ImageRef, LayoutVariant, PageArrangement, PaperStyle};
pub use ports::{CollectionKind, PortError, PortResult, StoryService};
pub use slides::{Progress, Slide, SlideDeck};
pub use theme::{resolve_theme, DecorationKind, ThemeDescriptor};
