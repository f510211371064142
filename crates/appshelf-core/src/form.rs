//! Admin create/edit form state and validation.

use std::collections::BTreeMap;

use appshelf_schema::{CatalogItem, Category, ItemDraft};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_ICON_URL: &str = "https://picsum.photos/seed/new/200/200";

/// Raw form input, exactly as typed. Every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub downloads: String,
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default)]
    pub description: String,
}

/// Field name -> message for every field that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid item form ({} field errors)", .fields.len())]
pub struct FormErrors {
    pub fields: BTreeMap<String, String>,
}

impl FormErrors {
    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

impl ItemForm {
    /// An empty "new item" form.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            category: Category::App.to_string(),
            downloads: "0".into(),
            upload_date: today.format("%Y-%m-%d").to_string(),
            icon_url: DEFAULT_ICON_URL.into(),
            ..Self::default()
        }
    }

    /// A form prefilled for editing `item`.
    pub fn from_item(item: &CatalogItem) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.to_string(),
            version: item.version.clone(),
            downloads: item.downloads.to_string(),
            upload_date: item.upload_date.format("%Y-%m-%d").to_string(),
            icon_url: item.icon_url.clone(),
            description: item.description.clone(),
        }
    }

    /// Check every field and build the draft, or report all failures at once.
    pub fn validate(&self) -> Result<ItemDraft, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "name is required");
        }

        let category = match self.category.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => {
                errors.add("category", "category must be one of game, app, software");
                None
            }
        };

        let version = self.version.trim();
        if version.is_empty() {
            errors.add("version", "version is required");
        }

        let downloads = match self.downloads.trim().parse::<u64>() {
            Ok(n) => Some(n),
            Err(_) => {
                errors.add("downloads", "downloads must be a whole number of 0 or more");
                None
            }
        };

        let upload_date = match NaiveDate::parse_from_str(self.upload_date.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("uploadDate", "upload date must be a date (YYYY-MM-DD)");
                None
            }
        };

        let icon_url = self.icon_url.trim();
        if icon_url.is_empty() {
            errors.add("iconUrl", "icon URL is required");
        }

        if self.description.trim().is_empty() {
            errors.add("description", "description is required");
        }

        match (category, downloads, upload_date) {
            (Some(category), Some(downloads), Some(upload_date)) if errors.is_empty() => {
                Ok(ItemDraft {
                    name: name.to_string(),
                    category,
                    icon_url: icon_url.to_string(),
                    description: self.description.clone(),
                    downloads,
                    version: version.to_string(),
                    upload_date,
                })
            }
            _ => Err(errors),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        UInt(u64),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::UInt(n) => n.to_string(),
        Raw::Int(n) => n.to_string(),
        // non-integral or out-of-range floats stay as text and fail validation
        Raw::Float(f) if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 => {
            (f as u64).to_string()
        }
        Raw::Float(f) => f.to_string(),
    })
}
