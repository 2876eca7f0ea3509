use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;

use db::DynMatchStore;

/// Build the application router around an injected match store.
pub fn app(store: DynMatchStore) -> Router {
    // CORS configuration for browser frontends
    let cors = CorsLayer::new()
        .allow_origin(Any) // In production, use specific origins
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Match Tracker API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Match endpoints
        .route(
            "/api/matches",
            get(routes::matches::list_matches).post(routes::matches::create_match),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
