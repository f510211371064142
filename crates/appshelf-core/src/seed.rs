//! Initial catalog contents: a YAML seed file or the built-in demo list.

use std::path::Path;

use appshelf_schema::{Category, ItemDraft};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::error::{CoreError, CoreResult};
use crate::store::{CatalogStore, IdGenerator};

/// One seed record. `id` is optional; missing ids are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub item: ItemDraft,
}

/// Build a store holding `entries` in order.
pub fn build_store(entries: Vec<SeedEntry>, ids: Box<dyn IdGenerator>) -> CoreResult<CatalogStore> {
    let mut store = CatalogStore::with_id_generator(ids);
    for entry in entries {
        store.append(entry.id, entry.item)?;
    }
    Ok(store)
}

/// Read the configured seed file, or fall back to [`demo_catalog`].
pub fn load_seed(config_dir: &Path, catalog: &CatalogConfig) -> CoreResult<Vec<SeedEntry>> {
    let Some(file) = catalog.seed_file.as_deref() else {
        return Ok(demo_catalog());
    };
    let path = config_dir.join(file);
    let content = std::fs::read_to_string(&path).map_err(|e| CoreError::io(&path, e))?;
    let entries: Vec<SeedEntry> =
        serde_yaml::from_str(&content).map_err(|e| CoreError::yaml(&path, e))?;
    tracing::info!(path = %path.display(), items = entries.len(), "seed catalog loaded");
    Ok(entries)
}

fn entry(
    id: &str,
    name: &str,
    category: Category,
    downloads: u64,
    version: &str,
    (y, m, d): (i32, u32, u32),
    description: &str,
) -> SeedEntry {
    SeedEntry {
        id: Some(id.to_string()),
        item: ItemDraft {
            name: name.to_string(),
            category,
            icon_url: format!("https://picsum.photos/seed/{id}/200/200"),
            description: description.to_string(),
            downloads,
            version: version.to_string(),
            upload_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        },
    }
}

/// Sample catalog shipped with the binary.
pub fn demo_catalog() -> Vec<SeedEntry> {
    vec![
        entry(
            "1",
            "ببجي موبايل",
            Category::Game,
            1_500_000,
            "3.1.0",
            (2024, 3, 12),
            "لعبة باتل رويال جماعية على الهاتف.",
        ),
        entry(
            "2",
            "واتساب",
            Category::App,
            5_000_000,
            "2.24.6",
            (2024, 3, 20),
            "تطبيق مراسلة فورية ومكالمات صوتية ومرئية.",
        ),
        entry(
            "3",
            "Visual Studio Code",
            Category::Software,
            950_000,
            "1.87.2",
            (2024, 3, 14),
            "محرر أكواد خفيف يدعم الإضافات.",
        ),
        entry(
            "4",
            "كاندي كراش",
            Category::Game,
            2_100_000,
            "1.270",
            (2023, 12, 5),
            "لعبة ألغاز بمطابقة الحلوى.",
        ),
        entry(
            "5",
            "Telegram",
            Category::App,
            3_200_000,
            "10.9.1",
            (2024, 2, 28),
            "مراسلة سحابية سريعة وآمنة.",
        ),
        entry(
            "6",
            "VLC",
            Category::Software,
            780_000,
            "3.0.20",
            (2023, 11, 1),
            "مشغل وسائط يدعم معظم الصيغ.",
        ),
        entry(
            "7",
            "Minecraft",
            Category::Game,
            1_200_000,
            "1.20.70",
            (2024, 1, 18),
            "عالم مفتوح للبناء والاستكشاف.",
        ),
        entry(
            "8",
            "أذكار المسلم",
            Category::App,
            640_000,
            "4.2",
            (2024, 1, 2),
            "أذكار الصباح والمساء مع تنبيهات.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SequentialIds;

    #[test]
    fn demo_catalog_has_unique_ids_and_every_category() {
        let entries = demo_catalog();
        let store = build_store(entries, Box::new(SequentialIds::new())).unwrap();
        assert_eq!(store.len(), 8);
        for category in Category::ALL {
            assert!(store.list().iter().any(|item| item.category == category));
        }
        assert_eq!(store.list()[0].id, "1");
        assert!(store
            .list()
            .iter()
            .all(|item| !item.description.is_empty() && !item.version.is_empty()));
    }

    #[test]
    fn no_seed_file_uses_demo() {
        let tmp = tempfile::TempDir::new().unwrap();
        let entries = load_seed(tmp.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(entries, demo_catalog());
    }

    #[test]
    fn seed_file_ids_are_optional() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("catalog.yaml"),
            r#"- id: chess
  name: Chess
  category: game
  downloads: 10
  uploadDate: 2024-02-01
- name: Notes
  category: app
  uploadDate: 2024-02-02
"#,
        )
        .unwrap();

        let config = CatalogConfig {
            seed_file: Some("catalog.yaml".into()),
        };
        let entries = load_seed(tmp.path(), &config).unwrap();
        let store = build_store(entries, Box::new(SequentialIds::new())).unwrap();
        let ids: Vec<_> = store.list().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["chess", "item-1"]);
    }

    #[test]
    fn missing_seed_file_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = CatalogConfig {
            seed_file: Some("nope.yaml".into()),
        };
        let err = load_seed(tmp.path(), &config).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
        assert!(err.to_string().contains("nope.yaml"));
    }
}
