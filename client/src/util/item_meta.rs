//! Category and icon derivation from an item's name.
//!
//! Both lookups are keyword tables over the lowercased name; the first
//! matching row wins.

#[cfg(test)]
#[path = "item_meta_test.rs"]
mod item_meta_test;

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Frontend,
    Backend,
    Database,
    DevOps,
    Tools,
}

impl Category {
    /// Display order for filter chips.
    pub const ALL: [Self; 5] = [Self::Frontend, Self::Backend, Self::Database, Self::DevOps, Self::Tools];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::Database => "Database",
            Self::DevOps => "DevOps",
            Self::Tools => "Tools",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}` (expected one of Frontend, Backend, Database, DevOps, Tools)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

const CATEGORY_KEYWORDS: [(&[&str], Category); 4] = [
    (&["angular", "rxjs", "typescript"], Category::Frontend),
    (&["node", "express"], Category::Backend),
    (&["mongo"], Category::Database),
    (&["docker", "kubernetes"], Category::DevOps),
];

const ICON_KEYWORDS: [(&str, &str); 8] = [
    ("angular", "web"),
    ("rxjs", "timeline"),
    ("typescript", "code"),
    ("node", "memory"),
    ("express", "api"),
    ("mongo", "storage"),
    ("docker", "inbox"),
    ("kubernetes", "account_tree"),
];

pub const DEFAULT_ICON: &str = "extension";

/// Category for an item name; unmatched names are `Tools`.
#[must_use]
pub fn item_category(name: &str) -> Category {
    let name = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map_or(Category::Tools, |(_, category)| *category)
}

/// Material icon name for an item name.
#[must_use]
pub fn item_icon(name: &str) -> &'static str {
    let name = name.to_lowercase();
    ICON_KEYWORDS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map_or(DEFAULT_ICON, |(_, icon)| *icon)
}
