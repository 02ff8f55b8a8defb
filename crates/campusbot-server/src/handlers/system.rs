//! System handlers

use axum::{response::IntoResponse, Json};

use crate::types::HealthResponse;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
