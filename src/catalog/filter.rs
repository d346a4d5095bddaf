// src/catalog/filter.rs

//! Query/filter engine.
//!
//! `filter` is a pure function of the catalog, the interaction state and a
//! [`FilterSpec`]. Active predicates are AND'ed together; the output keeps
//! catalog order. This is a linear scan per query, which is fine for catalogs
//! of a few hundred items. Larger catalogs would want an inverted index over
//! tags and categories instead.

use crate::{
    catalog::{InteractionStore, store::Catalog},
    models::{
        filter::FilterSpec,
        interaction::{InteractionState, ItemStatus},
        item::{CatalogItem, ItemDetails},
    },
};

/// Runs a query. An empty spec returns the whole catalog in order.
pub fn filter<'a>(
    catalog: &'a Catalog,
    states: &InteractionStore,
    spec: &FilterSpec,
) -> Vec<&'a CatalogItem> {
    let needle = spec.needle();
    catalog
        .items()
        .iter()
        .filter(|item| matches(item, states.get(&item.id), spec, needle.as_deref()))
        .collect()
}

/// Evaluates all active predicates for one item, in order: search, category,
/// difficulty, status. `needle` must already be trimmed and lower-cased.
pub fn matches(
    item: &CatalogItem,
    state: Option<&InteractionState>,
    spec: &FilterSpec,
    needle: Option<&str>,
) -> bool {
    if let Some(needle) = needle {
        if !matches_search(item, needle) {
            return false;
        }
    }

    if let Some(category) = spec.category_constraint() {
        if item.category != category {
            return false;
        }
    }

    if let Some(difficulty) = spec.difficulty {
        if item.difficulty != difficulty {
            return false;
        }
    }

    if let Some(status) = spec.status {
        if classify(item, state) != status {
            return false;
        }
    }

    true
}

/// Case-insensitive substring match over any searchable field.
fn matches_search(item: &CatalogItem, needle: &str) -> bool {
    item.searchable_fields()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Classifies an item from its recorded facts.
///
/// Quizzes use the attempt record; tutorials use watch progress.
pub fn classify(item: &CatalogItem, state: Option<&InteractionState>) -> ItemStatus {
    match &item.details {
        ItemDetails::Quiz(_) => match state.and_then(|s| s.attempt.as_ref()) {
            None => ItemStatus::NotAttempted,
            Some(attempt) if attempt.completed => ItemStatus::Completed,
            Some(_) => ItemStatus::InProgress,
        },
        ItemDetails::Tutorial(_) => match state.and_then(|s| s.progress) {
            None => ItemStatus::NotAttempted,
            Some(p) if p <= 0.0 => ItemStatus::NotAttempted,
            Some(p) if p >= 100.0 => ItemStatus::Completed,
            Some(_) => ItemStatus::InProgress,
        },
    }
}
