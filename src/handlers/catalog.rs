// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    error::AppError,
    models::{
        filter::{FilterParams, FilterSpec},
        item::CatalogKind,
    },
    state::AppState,
};

/// Liveness probe with catalog sizes.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let quizzes = state.quizzes.read().await.catalog().len();
    let tutorials = state.tutorials.read().await.catalog().len();

    Json(serde_json::json!({
        "ok": true,
        "quizzes": quizzes,
        "tutorials": tutorials,
    }))
}

/// Lists a catalog, optionally filtered by search keyword, category,
/// difficulty and completion status.
///
/// An empty match is a normal `200` with `matched: 0`.
pub async fn list_items(
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
    Query(params): Query<FilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let spec = FilterSpec::try_from(params).map_err(AppError::BadRequest)?;

    let session = state.session(kind).read().await;
    let result = session.search(&spec, Utc::now());

    Ok(Json(result))
}

/// Retrieves a single item with the user's state.
pub async fn get_item(
    State(state): State<AppState>,
    Path((kind, id)): Path<(CatalogKind, String)>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session(kind).read().await;
    let view = session.view(&id, Utc::now())?;

    Ok(Json(view))
}

/// Distinct categories, for the filter dropdown.
pub async fn list_categories(
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
) -> impl IntoResponse {
    let session = state.session(kind).read().await;
    let categories: Vec<String> = session
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(categories)
}
