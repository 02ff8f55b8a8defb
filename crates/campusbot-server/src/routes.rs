//! HTTP API route definitions

use axum::http::Method;
use axum::{
    routing::{get, post},
    Router,
};
use campusbot_core::ServerConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .route("/api/embedding", post(handlers::embedding))
        .route("/api/generate", post(handlers::generate))
        .route("/api/documents", post(handlers::documents))
        .route("/api/populate", post(handlers::populate))
        .with_state(state)
}

/// Router with CORS and request tracing layers
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let mut app = create_router(state);

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
            .allow_origin(Any);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}
