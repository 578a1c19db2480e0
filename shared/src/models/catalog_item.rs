//! Catalog Item Model

use serde::{Deserialize, Serialize};

/// Catalog category (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Textbooks,
    Stationery,
    ScienceKits,
    ArtSupplies,
    Electronics,
    Other,
}

/// Catalog item entity
///
/// Owned exclusively by the catalog store; orders and quotes hold snapshot
/// copies of the fields they need, never live references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Current selling price
    pub price: f64,
    /// Pre-discount price; when present, must be >= price (display only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: Category,
    pub in_stock: bool,
    pub featured: bool,
    /// Display order preserved; matching is order-irrelevant
    #[serde(default)]
    pub tags: Vec<String>,
    /// Epoch milliseconds (UTC)
    pub created_at: i64,
    /// Refreshed on every mutation; always >= created_at
    pub updated_at: i64,
}

impl CatalogItem {
    /// Integer display discount derived from original vs. current price
    pub fn discount_percent(&self) -> u32 {
        crate::pricing::discount_percent(self.price, self.original_price)
    }
}

/// Create catalog item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItemCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: Category,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Update catalog item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// `Some(None)` clears the original price
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Option<f64>>,
    pub category: Option<Category>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// Serde helper distinguishing "field absent" from "field set to null"
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Ok(Some(Option::deserialize(deserializer)?))
    }
}

/// Catalog listing filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemFilter {
    pub category: Option<Category>,
    /// Case-insensitive match over name, description, and tags
    pub search: Option<String>,
    #[serde(default)]
    pub featured_only: bool,
}

impl ItemFilter {
    /// Whether the given item passes this filter
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(category) = self.category
            && item.category != category
        {
            return false;
        }
        if self.featured_only && !item.featured {
            return false;
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            if term.is_empty() {
                return true;
            }
            let in_name = item.name.to_lowercase().contains(&term);
            let in_description = item.description.to_lowercase().contains(&term);
            let in_tags = item.tags.iter().any(|t| t.to_lowercase().contains(&term));
            if !(in_name || in_description || in_tags) {
                return false;
            }
        }
        true
    }
}
