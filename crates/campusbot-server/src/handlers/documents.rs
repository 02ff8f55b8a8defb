//! Ingestion handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use campusbot_core::{ingest_text, populate_embeddings};
use tracing::{error, info};

use super::{error_response, AppState};
use crate::types::{DocumentRequest, DocumentResponse, ErrorResponse, PopulateResponse};

/// Chunk, embed and store an uploaded text blob
pub async fn documents(
    State(state): State<AppState>,
    Json(request): Json<DocumentRequest>,
) -> impl IntoResponse {
    let (Some(text), Some(filename), Some(storage_path)) =
        (request.text, request.filename, request.storage_path)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "Missing text, filename, or storagePath",
            )),
        )
            .into_response();
    };

    let result = ingest_text(
        state.chat.database(),
        state.chat.embedder(),
        &filename,
        &storage_path,
        &text,
        &state.chunking,
    )
    .await;

    match result {
        Ok(report) => {
            info!(
                "Ingested {}: {} chunks, {} errors",
                filename, report.chunks_inserted, report.errors
            );
            (
                StatusCode::OK,
                Json(DocumentResponse {
                    message: "Document processed".to_string(),
                    chunks_inserted: report.chunks_inserted,
                    errors: report.errors,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Ingesting {} failed: {}", filename, e);
            error_response(&e)
        }
    }
}

/// Embed every domain table row into the chunk store
pub async fn populate(State(state): State<AppState>) -> impl IntoResponse {
    match populate_embeddings(state.chat.database(), state.chat.embedder()).await {
        Ok(report) => (
            StatusCode::OK,
            Json(PopulateResponse {
                message: "Population complete".to_string(),
                inserted: report.inserted,
                skipped: report.skipped,
                failed: report.failed,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Population failed: {}", e);
            error_response(&e)
        }
    }
}
