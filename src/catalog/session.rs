// src/catalog/session.rs

//! Interaction-state synchronizer.
//!
//! A [`Session`] owns one catalog, its interaction state and the derived
//! views. All writes go through it, and every successful write rebuilds the
//! [`DerivedIndex`] from the post-mutation state before returning. A write to
//! an unknown id touches nothing and reports [`CatalogError::NotFound`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{
        CatalogError, DerivedIndex, InteractionStore, ViewName,
        filter::{classify, filter},
        store::Catalog,
    },
    models::{
        filter::FilterSpec,
        interaction::{AttemptRecord, Flag, InteractionState},
        item::{CatalogItem, CatalogKind},
        view::{ItemView, MutationOutcome, QueryResult, ViewsResponse},
    },
};

/// One of the two things the presentation layer can send.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Query {
        #[serde(default)]
        filter: FilterSpec,
    },
    Mutate {
        item_id: String,
        op: Mutation,
    },
}

/// State changes addressed to a single item.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    Toggle { flag: Flag },
    SetProgress { percent: f64 },
    Open,
    RecordAttempt {
        #[serde(default)]
        score: Option<u32>,
        completed: bool,
    },
}

/// What applying an [`Event`] produced.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    Results(QueryResult),
    Mutated(MutationOutcome),
}

#[derive(Debug, Clone)]
pub struct Session {
    kind: CatalogKind,
    catalog: Catalog,
    states: InteractionStore,
    index: DerivedIndex,
}

impl Session {
    pub fn new(kind: CatalogKind, catalog: Catalog) -> Self {
        Self::with_states(kind, catalog, InteractionStore::new())
    }

    /// Starts from externally supplied state, e.g. attempt history.
    pub fn with_seeded_states(
        kind: CatalogKind,
        catalog: Catalog,
        seeded: HashMap<String, InteractionState>,
    ) -> Result<Self, CatalogError> {
        if let Some(unknown) = seeded.keys().find(|id| !catalog.contains(id)) {
            return Err(CatalogError::NotFound(unknown.clone()));
        }
        Ok(Self::with_states(
            kind,
            catalog,
            InteractionStore::from_states(seeded),
        ))
    }

    fn with_states(kind: CatalogKind, catalog: Catalog, states: InteractionStore) -> Self {
        let index = DerivedIndex::rebuild(&catalog, &states);
        tracing::info!(
            catalog = %kind,
            items = catalog.len(),
            seeded = states.len(),
            "Catalog session ready"
        );
        Self {
            kind,
            catalog,
            states,
            index,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &DerivedIndex {
        &self.index
    }

    pub fn states(&self) -> &InteractionStore {
        &self.states
    }

    /// State of one item; unknown ids are an error, untouched ids are default.
    pub fn state(&self, id: &str) -> Result<InteractionState, CatalogError> {
        self.ensure_known(id)?;
        Ok(self.states.state(id))
    }

    pub fn item(&self, id: &str) -> Result<&CatalogItem, CatalogError> {
        self.catalog
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn view(&self, id: &str, now: DateTime<Utc>) -> Result<ItemView, CatalogError> {
        let item = self.item(id)?;
        Ok(ItemView::new(item, self.states.get(id), now))
    }

    /// Runs the filter engine.
    pub fn query(&self, spec: &FilterSpec) -> Vec<&CatalogItem> {
        filter(&self.catalog, &self.states, spec)
    }

    /// Runs the filter engine and decorates matches for display.
    pub fn search(&self, spec: &FilterSpec, now: DateTime<Utc>) -> QueryResult {
        let items: Vec<ItemView> = self
            .query(spec)
            .into_iter()
            .map(|item| ItemView::new(item, self.states.get(&item.id), now))
            .collect();
        tracing::debug!(
            catalog = %self.kind,
            matched = items.len(),
            total = self.catalog.len(),
            "Catalog query"
        );
        QueryResult {
            total: self.catalog.len(),
            matched: items.len(),
            items,
        }
    }

    /// Items of one derived partition, resolved back to full records.
    pub fn resolve(&self, view: ViewName) -> Vec<&CatalogItem> {
        self.catalog.resolve(self.index.partition(view))
    }

    pub fn views(&self) -> ViewsResponse {
        ViewsResponse {
            index: self.index.clone(),
            counts: self.index.counts(),
        }
    }

    pub fn categories(&self) -> Vec<&str> {
        self.catalog.categories()
    }

    /// Flips `flag` on one item and returns its new state.
    pub fn toggle(&mut self, id: &str, flag: Flag) -> Result<InteractionState, CatalogError> {
        self.ensure_known(id)?;
        let state = self.states.toggle(id, flag);
        self.commit();
        tracing::debug!(catalog = %self.kind, %id, %flag, value = state.flag(flag), "Flag toggled");
        Ok(state)
    }

    pub fn set_progress(
        &mut self,
        id: &str,
        percent: f64,
    ) -> Result<InteractionState, CatalogError> {
        self.set_progress_at(id, percent, Utc::now())
    }

    /// Stores clamped progress; `now` stamps `last_accessed` when the item
    /// starts from zero.
    pub fn set_progress_at(
        &mut self,
        id: &str,
        percent: f64,
        now: DateTime<Utc>,
    ) -> Result<InteractionState, CatalogError> {
        self.ensure_known(id)?;
        let state = self.states.set_progress(id, percent, now);
        self.commit();
        tracing::debug!(catalog = %self.kind, %id, requested = percent, progress = ?state.progress, "Progress updated");
        Ok(state)
    }

    pub fn open(&mut self, id: &str) -> Result<InteractionState, CatalogError> {
        self.open_at(id, Utc::now())
    }

    /// Marks the item as opened at `now`, moving it to the front of history.
    pub fn open_at(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<InteractionState, CatalogError> {
        self.ensure_known(id)?;
        let state = self.states.mark_opened(id, now);
        self.commit();
        tracing::debug!(catalog = %self.kind, %id, "Item opened");
        Ok(state)
    }

    /// Records an externally produced quiz attempt.
    pub fn record_attempt(
        &mut self,
        id: &str,
        attempt: AttemptRecord,
    ) -> Result<InteractionState, CatalogError> {
        self.ensure_known(id)?;
        if self.item(id)?.quiz().is_none() {
            return Err(CatalogError::Unsupported {
                id: id.to_string(),
                reason: "attempts are only recorded for quizzes".to_string(),
            });
        }
        let state = self.states.record_attempt(id, attempt);
        self.commit();
        tracing::debug!(catalog = %self.kind, %id, completed = ?state.attempt.as_ref().map(|a| a.completed), "Attempt recorded");
        Ok(state)
    }

    pub fn apply(&mut self, event: Event) -> Result<Outcome, CatalogError> {
        self.apply_at(event, Utc::now())
    }

    /// Applies one event. Mutations answer with the rebuilt index.
    pub fn apply_at(&mut self, event: Event, now: DateTime<Utc>) -> Result<Outcome, CatalogError> {
        match event {
            Event::Query { filter } => Ok(Outcome::Results(self.search(&filter, now))),
            Event::Mutate { item_id, op } => {
                match op {
                    Mutation::Toggle { flag } => self.toggle(&item_id, flag)?,
                    Mutation::SetProgress { percent } => {
                        self.set_progress_at(&item_id, percent, now)?
                    }
                    Mutation::Open => self.open_at(&item_id, now)?,
                    Mutation::RecordAttempt { score, completed } => self.record_attempt(
                        &item_id,
                        AttemptRecord {
                            score,
                            completed,
                            attempted_at: now,
                        },
                    )?,
                };
                self.outcome(&item_id).map(Outcome::Mutated)
            }
        }
    }

    /// Snapshot of one item's state plus the current views.
    pub fn outcome(&self, id: &str) -> Result<MutationOutcome, CatalogError> {
        let item = self.item(id)?;
        let state = self.states.state(id);
        let status = classify(item, Some(&state));
        Ok(MutationOutcome {
            item_id: id.to_string(),
            state,
            status,
            index: self.index.clone(),
            counts: self.index.counts(),
        })
    }

    fn ensure_known(&self, id: &str) -> Result<(), CatalogError> {
        if self.catalog.contains(id) {
            Ok(())
        } else {
            tracing::warn!(catalog = %self.kind, %id, "Unknown item id");
            Err(CatalogError::NotFound(id.to_string()))
        }
    }

    fn commit(&mut self) {
        self.index = DerivedIndex::rebuild(&self.catalog, &self.states);
    }
}
