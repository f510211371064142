//! In-memory catalog store.
//!
//! The store is the single owner of the item list. Newly added items are
//! prepended, so `list()` shows the most recent additions first followed by
//! the seed order. Update and delete of an unknown id are no-ops; they
//! report `false` so callers can tell.

use std::collections::HashSet;

use appshelf_schema::{CatalogItem, ItemDraft};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

const MAX_ID_ATTEMPTS: usize = 8;

/// Source of fresh item ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic ids (`item-1`, `item-2`, ...). Deterministic, used for demos and tests.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("item-{}", self.next)
    }
}

pub struct CatalogStore {
    items: Vec<CatalogItem>,
    ids: Box<dyn IdGenerator>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("items", &self.items.len())
            .finish()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(UuidIds))
    }

    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            items: Vec::new(),
            ids,
        }
    }

    /// Build a store from existing items, keeping their order.
    pub fn with_items(items: Vec<CatalogItem>) -> CoreResult<Self> {
        let mut store = Self::new();
        store.load(items)?;
        Ok(store)
    }

    /// Replace the contents with `items`. Fails without modifying the store
    /// when two items share an id.
    pub fn load(&mut self, items: Vec<CatalogItem>) -> CoreResult<()> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CoreError::DuplicateId(item.id.clone()));
            }
        }
        self.items = items;
        Ok(())
    }

    pub fn list(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Store `draft` under a fresh id and return the stored item.
    pub fn add(&mut self, draft: ItemDraft) -> CoreResult<CatalogItem> {
        let id = self.fresh_id()?;
        let item = CatalogItem::from_draft(id, draft);
        self.items.insert(0, item.clone());
        tracing::info!(id = %item.id, name = %item.name, "catalog item added");
        Ok(item)
    }

    /// Append a seed record at the end of the list, keeping `id` when given.
    pub fn append(&mut self, id: Option<String>, draft: ItemDraft) -> CoreResult<CatalogItem> {
        let id = match id {
            Some(id) if self.get_by_id(&id).is_some() => return Err(CoreError::DuplicateId(id)),
            Some(id) => id,
            None => self.fresh_id()?,
        };
        let item = CatalogItem::from_draft(id, draft);
        self.items.push(item.clone());
        Ok(item)
    }

    /// Replace the item carrying `item.id`. Returns `false` when no such item exists.
    pub fn update(&mut self, item: CatalogItem) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                tracing::info!(id = %item.id, "catalog item updated");
                *existing = item;
                true
            }
            None => {
                tracing::debug!(id = %item.id, "update ignored: unknown id");
                false
            }
        }
    }

    /// Remove the item with `id`. Returns `false` when it was absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::info!(id, "catalog item deleted");
        } else {
            tracing::debug!(id, "delete ignored: unknown id");
        }
        removed
    }

    fn fresh_id(&mut self) -> CoreResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if self.get_by_id(&candidate).is_none() {
                return Ok(candidate);
            }
        }
        Err(CoreError::IdExhausted(MAX_ID_ATTEMPTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appshelf_schema::Category;
    use chrono::NaiveDate;

    fn draft(name: &str, downloads: u64) -> ItemDraft {
        ItemDraft {
            name: name.to_string(),
            category: Category::App,
            icon_url: String::new(),
            description: format!("{name} description"),
            downloads,
            version: "1.0".into(),
            upload_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    fn sequential_store() -> CatalogStore {
        CatalogStore::with_id_generator(Box::new(SequentialIds::new()))
    }

    /// Always hands out the same id.
    struct StuckIds;

    impl IdGenerator for StuckIds {
        fn next_id(&mut self) -> String {
            "same".into()
        }
    }

    #[test]
    fn add_assigns_id_and_prepends() {
        let mut store = sequential_store();
        let first = store.add(draft("First", 1)).unwrap();
        let second = store.add(draft("Second", 2)).unwrap();

        assert_eq!(first.id, "item-1");
        assert_eq!(second.id, "item-2");
        let names: Vec<_> = store.list().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn added_item_is_input_plus_id() {
        let mut store = CatalogStore::new();
        let input = draft("Maps", 10);
        let stored = store.add(input.clone()).unwrap();

        let found = store.get_by_id(&stored.id).unwrap();
        assert_eq!(found.draft(), input);
        assert_eq!(found, &stored);
    }

    #[test]
    fn uuid_ids_are_distinct() {
        let mut store = CatalogStore::new();
        let a = store.add(draft("A", 0)).unwrap();
        let b = store.add(draft("B", 0)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn update_replaces_only_matching_item() {
        let mut store = sequential_store();
        let a = store.add(draft("A", 1)).unwrap();
        let b = store.add(draft("B", 2)).unwrap();

        let mut modified = a.clone();
        modified.name = "A2".into();
        modified.downloads = 99;
        assert!(store.update(modified.clone()));

        assert_eq!(store.get_by_id(&a.id), Some(&modified));
        assert_eq!(store.get_by_id(&b.id), Some(&b));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = sequential_store();
        let a = store.add(draft("A", 1)).unwrap();
        let mut ghost = a.clone();
        ghost.id = "ghost".into();

        assert!(!store.update(ghost));
        assert_eq!(store.list(), &[a]);
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = sequential_store();
        let a = store.add(draft("A", 1)).unwrap();
        store.add(draft("B", 2)).unwrap();

        assert!(store.delete(&a.id));
        assert_eq!(store.len(), 1);
        assert!(store.get_by_id(&a.id).is_none());

        assert!(!store.delete(&a.id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let item = CatalogItem::from_draft("dup", draft("A", 1));
        let err = CatalogStore::with_items(vec![item.clone(), item]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(id) if id == "dup"));
    }

    #[test]
    fn append_keeps_seed_order_and_ids() {
        let mut store = sequential_store();
        store.append(Some("fixed".into()), draft("A", 1)).unwrap();
        store.append(None, draft("B", 2)).unwrap();
        let ids: Vec<_> = store.list().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["fixed", "item-1"]);

        let err = store.append(Some("fixed".into()), draft("C", 3)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId(_)));
    }

    #[test]
    fn colliding_generator_gives_up() {
        let mut store = CatalogStore::with_id_generator(Box::new(StuckIds));
        store.add(draft("A", 1)).unwrap();
        let err = store.add(draft("B", 1)).unwrap_err();
        assert!(matches!(err, CoreError::IdExhausted(_)));
        assert_eq!(store.len(), 1);
    }
}
