use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Partition of the catalog. Every item belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Game,
    App,
    Software,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Game, Category::App, Category::Software];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Game => "game",
            Category::App => "app",
            Category::Software => "software",
        }
    }

    /// Path segment used by the public navigation (`/games`, `/apps`, `/software`).
    pub fn nav_segment(self) -> &'static str {
        match self {
            Category::Game => "games",
            Category::App => "apps",
            Category::Software => "software",
        }
    }

    pub fn from_nav_segment(segment: &str) -> Option<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.nav_segment() == segment)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "game" => Ok(Category::Game),
            "app" => Ok(Category::App),
            "software" => Ok(Category::Software),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// Category selector for listing views: either everything or one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    /// Accepts `all`, the category names and the plural navigation segments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            return Ok(CategoryFilter::All);
        }
        if let Some(category) = Category::from_nav_segment(s) {
            return Ok(CategoryFilter::Only(category));
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Downloads,
    Date,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option: {0}")]
pub struct ParseSortError(pub String);

impl FromStr for SortOption {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "downloads" => Ok(SortOption::Downloads),
            "date" => Ok(SortOption::Date),
            "name" => Ok(SortOption::Name),
            other => Err(ParseSortError(other.to_string())),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortOption::Downloads => "downloads",
            SortOption::Date => "date",
            SortOption::Name => "name",
        };
        f.write_str(s)
    }
}

/// A catalog record before it has been stored (no id yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub version: String,
    pub upload_date: NaiveDate,
}

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub icon_url: String,
    pub description: String,
    pub downloads: u64,
    pub version: String,
    pub upload_date: NaiveDate,
}

impl CatalogItem {
    pub fn from_draft(id: impl Into<String>, draft: ItemDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            category: draft.category,
            icon_url: draft.icon_url,
            description: draft.description,
            downloads: draft.downloads,
            version: draft.version,
            upload_date: draft.upload_date,
        }
    }

    /// The item's fields without its id.
    pub fn draft(&self) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            category: self.category,
            icon_url: self.icon_url.clone(),
            description: self.description.clone(),
            downloads: self.downloads,
            version: self.version.clone(),
            upload_date: self.upload_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub avatar_url: String,
}

/// Snapshot of the administrator session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub is_logged_in: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub last_error: Option<String>,
}
