// src/handlers/interaction.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    catalog::Event,
    error::AppError,
    models::{
        interaction::{AttemptRecord, Flag},
        item::CatalogKind,
        view::MutationOutcome,
    },
    state::AppState,
};

/// Body for `PUT .../progress`. Out-of-range values are clamped.
#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub percent: f64,
}

/// Body for `POST .../attempt`.
#[derive(Debug, Deserialize)]
pub struct AttemptRequest {
    #[serde(default)]
    pub score: Option<u32>,
    pub completed: bool,
}

/// Flips one flag and answers with the rebuilt views.
async fn toggle_flag(
    state: &AppState,
    kind: CatalogKind,
    id: &str,
    flag: Flag,
) -> Result<Json<MutationOutcome>, AppError> {
    let mut session = state.session(kind).write().await;
    session.toggle(id, flag)?;
    let outcome = session.outcome(id)?;

    Ok(Json(outcome))
}

/// Toggle Like on an item.
pub async fn toggle_like(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
) -> Result<impl IntoResponse, AppError> {
    toggle_flag(&state, kind, &id, Flag::Liked).await
}

/// Toggle Save on an item.
pub async fn toggle_save(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
) -> Result<impl IntoResponse, AppError> {
    toggle_flag(&state, kind, &id, Flag::Saved).await
}

/// Toggle Download on an item.
pub async fn toggle_download(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
) -> Result<impl IntoResponse, AppError> {
    toggle_flag(&state, kind, &id, Flag::Downloaded).await
}

/// Marks an item as opened, adding it to the front of the history view.
pub async fn open_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session(kind).write().await;
    session.open(&id)?;

    Ok(Json(session.outcome(&id)?))
}

/// Updates watch progress.
pub async fn set_progress(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
    Json(payload): Json<ProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session(kind).write().await;
    session.set_progress(&id, payload.percent)?;

    Ok(Json(session.outcome(&id)?))
}

/// Records a quiz attempt reported by the exam flow.
pub async fn record_attempt(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
    Json(payload): Json<AttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let attempt = AttemptRecord {
        score: payload.score,
        completed: payload.completed,
        attempted_at: Utc::now(),
    };

    let mut session = state.session(kind).write().await;
    session.record_attempt(&id, attempt)?;

    Ok(Json(session.outcome(&id)?))
}

/// Applies one query or mutation event.
pub async fn apply_event(
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
    Json(event): Json<Event>,
) -> Result<impl IntoResponse, AppError> {
    let mut session = state.session(kind).write().await;
    let outcome = session.apply(event)?;

    Ok(Json(outcome))
}
