//! HTTP API request handlers

mod chat;
mod documents;
mod llm;
mod system;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campusbot_core::{CampusBotError, ChatService, ChunkingConfig};

use crate::types::ErrorResponse;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub chunking: ChunkingConfig,
}

impl AppState {
    pub fn new(chat: ChatService, chunking: ChunkingConfig) -> Self {
        Self { chat, chunking }
    }
}

pub use chat::chat;
pub use documents::{documents, populate};
pub use llm::{embedding, generate};
pub use system::health;

/// Map a core error onto a status code and JSON body
fn error_response(err: &CampusBotError) -> Response {
    let (status, body) = error_parts(err);
    (status, Json(body)).into_response()
}

fn error_parts(err: &CampusBotError) -> (StatusCode, ErrorResponse) {
    match err {
        CampusBotError::InvalidInput(message) => {
            (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(message.clone()))
        }
        CampusBotError::Config(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::config_error(message.clone()),
        ),
        CampusBotError::Upstream { .. } | CampusBotError::Http(_) | CampusBotError::Llm(_) => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::upstream_error(err.to_string()),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::internal_error(err.to_string()),
        ),
    }
}
