use crate::api::{handlers, AppState};
use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // Person discovery
        .route(
            "/persons",
            get(handlers::list_persons).post(handlers::index_persons),
        )
        .route("/persons/search/faceted", get(handlers::faceted_search))
        .route("/persons/:id", delete(handlers::delete_person))
        // Seeded reference data
        .route("/themes", get(handlers::list_themes))
        .route("/themes/:name", get(handlers::get_theme))
        .route("/directoryViews", get(handlers::list_directory_views))
        .route("/directoryViews/:name", get(handlers::get_directory_view))
        .route("/discoveryViews", get(handlers::list_discovery_views))
        .route("/discoveryViews/:name", get(handlers::get_discovery_view))
        // Harvest declarations
        .route("/harvest/sources", get(handlers::list_harvest_sources))
        .route(
            "/harvest/sources/:entity_type",
            get(handlers::get_harvest_source),
        )
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
