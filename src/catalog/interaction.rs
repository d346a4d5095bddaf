// src/catalog/interaction.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::interaction::{AttemptRecord, Flag, InteractionState};

/// Mutable per-item state keyed by item id.
///
/// Entries are created lazily on first mutation and never removed. Writes are
/// crate-private: the only writer is [`Session`](crate::catalog::Session),
/// which checks the id against the catalog first and rebuilds the derived
/// views afterwards.
#[derive(Debug, Clone, Default)]
pub struct InteractionStore {
    states: HashMap<String, InteractionState>,
}

impl InteractionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store; progress outside [0, 100] is clamped like any update.
    pub(crate) fn from_states(mut states: HashMap<String, InteractionState>) -> Self {
        for state in states.values_mut() {
            state.progress = state.progress.map(clamp_percent);
        }
        Self { states }
    }

    pub fn get(&self, id: &str) -> Option<&InteractionState> {
        self.states.get(id)
    }

    /// Current state, falling back to the all-default state.
    pub fn state(&self, id: &str) -> InteractionState {
        self.states.get(id).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn entry(&mut self, id: &str) -> &mut InteractionState {
        self.states.entry(id.to_string()).or_default()
    }

    pub(crate) fn toggle(&mut self, id: &str, flag: Flag) -> InteractionState {
        let state = self.entry(id);
        let value = state.flag_mut(flag);
        *value = !*value;
        state.clone()
    }

    pub(crate) fn set_progress(
        &mut self,
        id: &str,
        percent: f64,
        now: DateTime<Utc>,
    ) -> InteractionState {
        let state = self.entry(id);
        let previous = state.progress.unwrap_or(0.0);
        let next = clamp_percent(percent);
        if previous == 0.0 && next > 0.0 {
            state.last_accessed = Some(now);
        }
        state.progress = Some(next);
        state.clone()
    }

    pub(crate) fn mark_opened(&mut self, id: &str, now: DateTime<Utc>) -> InteractionState {
        let state = self.entry(id);
        state.last_accessed = Some(now);
        state.clone()
    }

    pub(crate) fn record_attempt(&mut self, id: &str, attempt: AttemptRecord) -> InteractionState {
        let state = self.entry(id);
        state.last_accessed = Some(attempt.attempted_at);
        state.attempt = Some(attempt);
        state.clone()
    }
}

/// Clamps into [0, 100]; NaN counts as no progress.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}
