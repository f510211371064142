use appshelf_schema::{CatalogItem, CategoryFilter, SortOption};
use serde::{Deserialize, Serialize};

use crate::collate::compare_names;

/// Parameters of one catalog listing: which items to keep and how to order them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn new(category: CategoryFilter) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `item` passes both the category and the name filter.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if !self.category.matches(item.category) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        item.name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    /// Filter and sort a snapshot. `items` is left untouched.
    pub fn apply(&self, items: &[CatalogItem]) -> Vec<CatalogItem> {
        let mut out: Vec<CatalogItem> = items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect();

        // sort_by is stable: equal keys keep their filtered order
        match self.sort {
            SortOption::Downloads => out.sort_by(|a, b| b.downloads.cmp(&a.downloads)),
            SortOption::Date => out.sort_by(|a, b| b.upload_date.cmp(&a.upload_date)),
            SortOption::Name => out.sort_by(|a, b| compare_names(&a.name, &b.name)),
        }
        out
    }
}
