//! crates/story_reader_core/src/theme.rs
//!
//! Derives the reader's visual theme from a story category.

use serde::Serialize;

/// The kind of floating decoration drawn around the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    Magic,
    Adventure,
    Nature,
    Default,
}

/// A category-derived bundle of styling tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub primary_gradient: &'static str,
    pub secondary_style: &'static str,
    pub accent_style: &'static str,
    pub decoration: DecorationKind,
}

pub const FANTASY_THEME: ThemeDescriptor = ThemeDescriptor {
    primary_gradient: "from-purple-600 to-blue-400",
    secondary_style: "bg-purple-100 dark:bg-purple-900/30",
    accent_style: "text-purple-600 dark:text-purple-300",
    decoration: DecorationKind::Magic,
};

pub const ADVENTURE_THEME: ThemeDescriptor = ThemeDescriptor {
    primary_gradient: "from-amber-500 to-orange-600",
    secondary_style: "bg-amber-100 dark:bg-amber-900/30",
    accent_style: "text-amber-600 dark:text-amber-300",
    decoration: DecorationKind::Adventure,
};

pub const NATURE_THEME: ThemeDescriptor = ThemeDescriptor {
    primary_gradient: "from-green-600 to-teal-400",
    secondary_style: "bg-green-100 dark:bg-green-900/30",
    accent_style: "text-green-600 dark:text-green-300",
    decoration: DecorationKind::Nature,
};

pub const DEFAULT_THEME: ThemeDescriptor = ThemeDescriptor {
    primary_gradient: "from-blue-500 to-indigo-600",
    secondary_style: "bg-blue-100 dark:bg-blue-900/30",
    accent_style: "text-blue-600 dark:text-blue-300",
    decoration: DecorationKind::Default,
};

// Checked in order; the first group with a matching keyword wins.
const KEYWORD_THEMES: [(&[&str], ThemeDescriptor); 3] = [
    (&["fantezi", "fantasy"], FANTASY_THEME),
    (&["macera", "adventure"], ADVENTURE_THEME),
    (&["doğa", "nature"], NATURE_THEME),
];

/// Resolves the theme for a category. A missing category behaves exactly like an
/// unrecognized one.
pub fn resolve_theme(category: Option<&str>) -> ThemeDescriptor {
    let category = category.unwrap_or_default().to_lowercase();

    KEYWORD_THEMES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| category.contains(k)))
        .map(|(_, theme)| *theme)
        .unwrap_or(DEFAULT_THEME)
}
