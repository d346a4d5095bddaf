// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{catalog, interaction, views},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Every catalog route is parameterised by `{catalog}` (`quizzes` or `tutorials`).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (the two catalog sessions).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let item_routes = Router::new()
        .route("/", get(catalog::list_items))
        .route("/{id}", get(catalog::get_item))
        .route("/{id}/like", post(interaction::toggle_like))
        .route("/{id}/save", post(interaction::toggle_save))
        .route("/{id}/download", post(interaction::toggle_download))
        .route("/{id}/open", post(interaction::open_item))
        .route("/{id}/progress", put(interaction::set_progress))
        .route("/{id}/attempt", post(interaction::record_attempt));

    let catalog_routes = Router::new()
        .nest("/items", item_routes)
        .route("/views", get(views::list_views))
        .route("/views/{view}", get(views::get_view))
        .route("/categories", get(catalog::list_categories))
        .route("/events", post(interaction::apply_event));

    Router::new()
        .route("/api/health", get(catalog::health))
        .nest("/api/{catalog}", catalog_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
