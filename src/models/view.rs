// src/models/view.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    catalog::{DerivedIndex, ViewCounts, filter::classify},
    models::{
        interaction::{InteractionState, ItemStatus},
        item::CatalogItem,
    },
    utils::format::{format_views, relative_time},
};

/// An item as the presentation layer sees it: the record plus the user's
/// state and everything derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub state: InteractionState,
    pub status: ItemStatus,

    /// Previous quiz score, when an attempt has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt_summary: Option<AttemptSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed_label: Option<String>,
}

/// Score of the last attempt against the quiz marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptSummary {
    pub score: u32,
    pub max_marks: u32,
    /// Rounded to the nearest whole percent.
    pub percent: u32,
    pub passed: bool,
}

impl ItemView {
    pub fn new(item: &CatalogItem, state: Option<&InteractionState>, now: DateTime<Utc>) -> Self {
        let state = state.cloned().unwrap_or_default();
        let status = classify(item, Some(&state));

        let attempt_summary = item.quiz().and_then(|quiz| {
            let score = state.attempt.as_ref()?.score?;
            let percent = if quiz.max_marks == 0 {
                0
            } else {
                ((score as f64 / quiz.max_marks as f64) * 100.0).round() as u32
            };
            Some(AttemptSummary {
                score,
                max_marks: quiz.max_marks,
                percent,
                passed: score >= quiz.passing_marks,
            })
        });

        let views_label = item.tutorial().map(|t| format_views(t.views));
        let last_accessed_label = state.last_accessed.map(|at| relative_time(at, now));

        Self {
            item: item.clone(),
            state,
            status,
            attempt_summary,
            views_label,
            last_accessed_label,
        }
    }
}

/// Response of a catalog query: "showing `matched` of `total`".
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub total: usize,
    pub matched: usize,
    pub items: Vec<ItemView>,
}

/// Response of a state mutation: the item's new state and the rebuilt views.
#[derive(Debug, Clone, Serialize)]
pub struct MutationOutcome {
    pub item_id: String,
    pub state: InteractionState,
    pub status: ItemStatus,
    pub index: DerivedIndex,
    pub counts: ViewCounts,
}

/// Derived partitions with their counters.
#[derive(Debug, Clone, Serialize)]
pub struct ViewsResponse {
    pub index: DerivedIndex,
    pub counts: ViewCounts,
}
