//! HTTP surface: axum router with CORS and request tracing

pub mod error;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use routes::AppState;

/// Build the application router. The searcher seam is injected so tests
/// drive the routes without a live browser.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health_handler))
        .route("/api/search", post(routes::search_handler))
        .route("/api/specialties", get(routes::specialties_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
