//! Chat handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campusbot_core::{CampusBotError, APOLOGY_MESSAGE};
use tracing::{debug, error};

use super::{error_parts, AppState};
use crate::types::{ChatErrorResponse, ChatRequest, ChatResponse};

/// Reply shown when the posted transcript has nothing to answer
const EMPTY_MESSAGE_REPLY: &str = "Please type a question so I can help.";

/// Chat endpoint: one retrieval-augmented turn over the posted transcript
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let session_id = request
        .session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    debug!(
        "HTTP chat request: session={}, messages={}",
        session_id,
        request.messages.len()
    );

    match state.chat.respond(&request.messages).await {
        Ok(reply) => {
            debug!("Chat turn for {} ended in {:?}", session_id, reply.final_state());
            (
                StatusCode::OK,
                Json(ChatResponse {
                    response: reply.response,
                    session_id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            if !e.is_invalid_input() {
                error!("Chat turn failed: {}", e);
            }
            chat_error_response(&e, session_id)
        }
    }
}

/// Error body that still carries a `response` for the widget to display
fn chat_error_response(err: &CampusBotError, session_id: String) -> Response {
    let (status, error) = error_parts(err);
    let response = if err.is_invalid_input() {
        EMPTY_MESSAGE_REPLY
    } else {
        APOLOGY_MESSAGE
    };
    (
        status,
        Json(ChatErrorResponse {
            response: response.to_string(),
            session_id,
            error,
        }),
    )
        .into_response()
}
