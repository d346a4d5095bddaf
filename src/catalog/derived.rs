// src/catalog/derived.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{InteractionStore, store::Catalog};

/// The four derived partitions, as item ids.
///
/// Always produced by [`DerivedIndex::rebuild`] from the current catalog and
/// interaction state; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedIndex {
    /// Opened items, most recent first.
    pub history: Vec<String>,
    pub saved: Vec<String>,
    pub liked: Vec<String>,
    pub downloaded: Vec<String>,
}

/// Sizes of the partitions, for summary counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewCounts {
    pub history: usize,
    pub saved: usize,
    pub liked: usize,
    pub downloaded: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewName {
    History,
    Saved,
    Liked,
    Downloaded,
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewName::History => "history",
            ViewName::Saved => "saved",
            ViewName::Liked => "liked",
            ViewName::Downloaded => "downloaded",
        };
        f.write_str(name)
    }
}

impl DerivedIndex {
    /// Full O(n) recomputation.
    pub fn rebuild(catalog: &Catalog, states: &InteractionStore) -> Self {
        let mut index = DerivedIndex::default();
        let mut opened = Vec::new();

        for item in catalog.items() {
            let Some(state) = states.get(&item.id) else {
                continue;
            };
            if let Some(at) = state.last_accessed {
                opened.push((at, item.id.clone()));
            }
            if state.saved {
                index.saved.push(item.id.clone());
            }
            if state.liked {
                index.liked.push(item.id.clone());
            }
            if state.downloaded {
                index.downloaded.push(item.id.clone());
            }
        }

        // Stable sort: equal timestamps keep catalog order.
        opened.sort_by(|a, b| b.0.cmp(&a.0));
        index.history = opened.into_iter().map(|(_, id)| id).collect();
        index
    }

    pub fn partition(&self, view: ViewName) -> &[String] {
        match view {
            ViewName::History => &self.history,
            ViewName::Saved => &self.saved,
            ViewName::Liked => &self.liked,
            ViewName::Downloaded => &self.downloaded,
        }
    }

    pub fn counts(&self) -> ViewCounts {
        ViewCounts {
            history: self.history.len(),
            saved: self.saved.len(),
            liked: self.liked.len(),
            downloaded: self.downloaded.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        interaction::Flag,
        item::{CatalogItem, Difficulty, ItemDetails, QuizDetails},
    };
    use chrono::{DateTime, Utc};

    fn item(id: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            category: "Math".to_string(),
            tags: vec![],
            difficulty: Difficulty::Beginner,
            details: ItemDetails::Quiz(QuizDetails {
                total_questions: 5,
                max_marks: 50,
                passing_marks: 25,
                duration_minutes: 10,
                subject: None,
                is_secure: false,
            }),
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn flags_keep_catalog_order() {
        let catalog = Catalog::new(vec![item("a"), item("b"), item("c")]).unwrap();
        let mut states = InteractionStore::new();
        states.toggle("c", Flag::Saved);
        states.toggle("a", Flag::Saved);
        states.toggle("b", Flag::Liked);

        let index = DerivedIndex::rebuild(&catalog, &states);

        assert_eq!(index.saved, vec!["a", "c"]);
        assert_eq!(index.liked, vec!["b"]);
        assert!(index.downloaded.is_empty());
        assert_eq!(index.counts().saved, 2);
    }

    #[test]
    fn history_is_most_recent_first() {
        let catalog = Catalog::new(vec![item("a"), item("b"), item("c"), item("d")]).unwrap();
        let mut states = InteractionStore::new();
        states.mark_opened("a", at("2024-09-10T00:00:00Z"));
        states.mark_opened("b", at("2024-09-20T00:00:00Z"));
        states.mark_opened("c", at("2024-09-15T00:00:00Z"));
        states.mark_opened("d", at("2024-09-15T00:00:00Z"));

        let index = DerivedIndex::rebuild(&catalog, &states);

        assert_eq!(index.history, vec!["b", "c", "d", "a"]);
        assert_eq!(index.partition(ViewName::History).len(), 4);
    }
}
