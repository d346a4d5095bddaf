// src/catalog/store.rs

use std::collections::HashMap;

use crate::{catalog::CatalogError, models::item::CatalogItem};

/// Read-only item collection for one session, in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the store, rejecting duplicate ids.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut positions = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if positions.insert(item.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items, positions })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.positions.get(id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Maps ids back to full records, skipping anything unknown.
    pub fn resolve<'a>(&'a self, ids: &[String]) -> Vec<&'a CatalogItem> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }
}
