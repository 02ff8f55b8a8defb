//! Embedding and generation passthrough handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::error;

use super::{error_response, AppState};
use crate::types::{
    EmbeddingRequest, EmbeddingResponse, ErrorResponse, GenerateRequest, GenerateResponse,
};

/// Embed a single text
pub async fn embedding(
    State(state): State<AppState>,
    Json(request): Json<EmbeddingRequest>,
) -> impl IntoResponse {
    if request.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("No text provided for embedding")),
        )
            .into_response();
    }

    match state.chat.embedder().embed(&request.text).await {
        Ok(embedding) => (StatusCode::OK, Json(EmbeddingResponse { embedding })).into_response(),
        Err(e) => {
            error!("Embedding failed: {}", e);
            error_response(&e)
        }
    }
}

/// Generate a reply for a transcript and caller-supplied context
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    if request.messages.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("No messages provided")),
        )
            .into_response();
    }

    let context = request.context();
    match state.chat.generator().generate(&request.messages, &context).await {
        Ok(response) => (StatusCode::OK, Json(GenerateResponse { response })).into_response(),
        Err(e) => {
            error!("Generation failed: {}", e);
            error_response(&e)
        }
    }
}
