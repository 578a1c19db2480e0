//! Catalog store
//!
//! Keyed in-memory store for catalog items. Reads take no coordination:
//! catalog mutation never retroactively affects already-snapshotted orders
//! or quotes.

use dashmap::DashMap;
use shared::models::{CatalogItem, CatalogItemCreate, CatalogItemUpdate, ItemFilter};
use shared::pricing;
use shared::util::now_millis;
use uuid::Uuid;

use super::{StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct CatalogStore {
    items: DashMap<String, CatalogItem>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// List items passing the filter, newest first
    pub fn find_all(&self, filter: &ItemFilter) -> Vec<CatalogItem> {
        let mut items: Vec<CatalogItem> = self
            .items
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        items
    }

    pub fn find_by_id(&self, id: &str) -> Option<CatalogItem> {
        self.items.get(id).map(|entry| entry.value().clone())
    }

    pub fn create(&self, payload: CatalogItemCreate) -> StoreResult<CatalogItem> {
        validate_item_fields(&payload.name, payload.price, payload.original_price)?;

        let now = now_millis();
        let item = CatalogItem {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            description: payload.description,
            price: payload.price,
            original_price: payload.original_price,
            category: payload.category,
            in_stock: payload.in_stock.unwrap_or(true),
            featured: payload.featured.unwrap_or(false),
            tags: payload.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    /// Update an item in place, refreshing `updated_at`
    pub fn update(&self, id: &str, payload: CatalogItemUpdate) -> StoreResult<CatalogItem> {
        let mut entry = self
            .items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("Catalog item {}", id)))?;
        let item = entry.value_mut();

        let name = payload.name.as_deref().unwrap_or(&item.name);
        let price = payload.price.unwrap_or(item.price);
        let original_price = match payload.original_price {
            Some(value) => value,
            None => item.original_price,
        };
        validate_item_fields(name, price, original_price)?;

        if let Some(name) = payload.name {
            item.name = name;
        }
        if let Some(description) = payload.description {
            item.description = description;
        }
        if let Some(price) = payload.price {
            item.price = price;
        }
        if let Some(original_price) = payload.original_price {
            item.original_price = original_price;
        }
        if let Some(category) = payload.category {
            item.category = category;
        }
        if let Some(in_stock) = payload.in_stock {
            item.in_stock = in_stock;
        }
        if let Some(featured) = payload.featured {
            item.featured = featured;
        }
        if let Some(tags) = payload.tags {
            item.tags = tags;
        }
        item.updated_at = now_millis();

        Ok(item.clone())
    }

    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        self.items
            .remove(id)
            .map(|_| true)
            .ok_or_else(|| StoreError::NotFound(format!("Catalog item {}", id)))
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }
}

fn validate_item_fields(name: &str, price: f64, original_price: Option<f64>) -> StoreResult<()> {
    if name.trim().is_empty() {
        return Err(StoreError::Validation("name must not be empty".to_string()));
    }
    pricing::validate_price(price, "price").map_err(|e| StoreError::Validation(e.to_string()))?;
    if let Some(original) = original_price {
        pricing::validate_price(original, "original_price")
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        if original < price {
            return Err(StoreError::Validation(format!(
                "original_price ({}) must be >= price ({})",
                original, price
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Category;

    fn create_payload(name: &str, price: f64) -> CatalogItemCreate {
        CatalogItemCreate {
            name: name.to_string(),
            description: "desc".to_string(),
            price,
            original_price: None,
            category: Category::Textbooks,
            in_stock: None,
            featured: None,
            tags: None,
        }
    }

    #[test]
    fn test_create_and_find() {
        let store = CatalogStore::new();
        let created = store.create(create_payload("Algebra I", 249.99)).unwrap();
        assert!(created.in_stock, "in_stock defaults to true");
        assert!(!created.featured);
        assert_eq!(created.created_at, created.updated_at);

        let found = store.find_by_id(&created.id).unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn test_create_rejects_original_price_below_price() {
        let store = CatalogStore::new();
        let mut payload = create_payload("Algebra I", 249.99);
        payload.original_price = Some(100.0);
        assert!(matches!(
            store.create(payload),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn test_create_rejects_blank_name_and_bad_price() {
        let store = CatalogStore::new();
        assert!(store.create(create_payload("  ", 10.0)).is_err());
        assert!(store.create(create_payload("Pen", -1.0)).is_err());
        assert!(store.create(create_payload("Pen", f64::NAN)).is_err());
    }

    #[test]
    fn test_update_refreshes_updated_at() {
        let store = CatalogStore::new();
        let created = store.create(create_payload("Algebra I", 249.99)).unwrap();

        let updated = store
            .update(
                &created.id,
                CatalogItemUpdate {
                    price: Some(199.99),
                    original_price: Some(Some(249.99)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.price, 199.99);
        assert_eq!(updated.original_price, Some(249.99));
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn test_update_clears_original_price() {
        let store = CatalogStore::new();
        let mut payload = create_payload("Algebra I", 199.99);
        payload.original_price = Some(249.99);
        let created = store.create(payload).unwrap();

        let updated = store
            .update(
                &created.id,
                CatalogItemUpdate {
                    original_price: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.original_price, None);
    }

    #[test]
    fn test_update_missing_id() {
        let store = CatalogStore::new();
        assert!(matches!(
            store.update("nope", CatalogItemUpdate::default()),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete() {
        let store = CatalogStore::new();
        let created = store.create(create_payload("Algebra I", 249.99)).unwrap();
        assert!(store.delete(&created.id).unwrap());
        assert!(store.find_by_id(&created.id).is_none());
        assert!(matches!(
            store.delete(&created.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_find_all_applies_filter() {
        let store = CatalogStore::new();
        let mut featured = create_payload("Microscope", 899.0);
        featured.category = Category::ScienceKits;
        featured.featured = Some(true);
        store.create(featured).unwrap();
        store.create(create_payload("Algebra I", 249.99)).unwrap();

        let all = store.find_all(&ItemFilter::default());
        assert_eq!(all.len(), 2);

        let featured_only = store.find_all(&ItemFilter {
            featured_only: true,
            ..Default::default()
        });
        assert_eq!(featured_only.len(), 1);
        assert_eq!(featured_only[0].name, "Microscope");

        let by_category = store.find_all(&ItemFilter {
            category: Some(Category::ScienceKits),
            ..Default::default()
        });
        assert_eq!(by_category.len(), 1);

        let by_search = store.find_all(&ItemFilter {
            search: Some("algebra".to_string()),
            ..Default::default()
        });
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].name, "Algebra I");
    }
}
