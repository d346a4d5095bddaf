// src/handlers/views.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    catalog::ViewName,
    models::{item::CatalogKind, view::ItemView},
    state::AppState,
};

/// All four derived partitions with their counters.
pub async fn list_views(
    State(state): State<AppState>,
    Path(kind): Path<CatalogKind>,
) -> impl IntoResponse {
    let session = state.session(kind).read().await;

    Json(session.views())
}

/// Items of one partition (history, saved, liked, downloaded), resolved to
/// full records in partition order.
pub async fn get_view(
    State(state): State<AppState>,
    Path((kind, view)): Path<(CatalogKind, ViewName)>,
) -> impl IntoResponse {
    let session = state.session(kind).read().await;
    let now = Utc::now();
    let items: Vec<ItemView> = session
        .resolve(view)
        .into_iter()
        .map(|item| ItemView::new(item, session.states().get(&item.id), now))
        .collect();

    Json(items)
}
