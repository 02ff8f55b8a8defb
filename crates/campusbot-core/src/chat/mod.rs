//! Chat turn orchestration
//!
//! One turn walks `Received → (Embedding) → ContextRetrieved →
//! GenerationCalled → Responded | ErrorResponded`. Retrieval failures
//! degrade to an empty context, generation failures to an apology. Only
//! configuration errors and invalid input fail the turn.

use crate::config::{RetrievalConfig, RetrievalMode};
use crate::db::SharedDatabase;
use crate::error::{CampusBotError, Result};
use crate::llm::{ChatMessage, Embedder, Generator};
use crate::search::{retrieve_by_embedding, retrieve_by_keywords, ContextEntry};
use crate::APOLOGY_MESSAGE;
use serde::Serialize;
use std::sync::Arc;

/// States visited by a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    Received,
    Embedding,
    ContextRetrieved,
    GenerationCalled,
    Responded,
    ErrorResponded,
}

/// Outcome of one chat turn
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub context: Vec<ContextEntry>,
    pub trace: Vec<TurnState>,
}

impl ChatReply {
    pub fn final_state(&self) -> Option<TurnState> {
        self.trace.last().copied()
    }

    /// Whether the user got the apology instead of a model reply
    pub fn is_apology(&self) -> bool {
        self.final_state() == Some(TurnState::ErrorResponded)
    }
}

/// Answers chat turns from retrieved context
#[derive(Clone)]
pub struct ChatService {
    db: SharedDatabase,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    retrieval: RetrievalConfig,
}

impl ChatService {
    pub fn new(
        db: SharedDatabase,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        retrieval: RetrievalConfig,
    ) -> Self {
        Self {
            db,
            embedder,
            generator,
            retrieval,
        }
    }

    pub fn database(&self) -> &SharedDatabase {
        &self.db
    }

    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    pub fn generator(&self) -> &dyn Generator {
        self.generator.as_ref()
    }

    /// Run one chat turn over the client-held transcript
    pub async fn respond(&self, messages: &[ChatMessage]) -> Result<ChatReply> {
        let query = latest_text(messages)?;
        let mut trace = vec![TurnState::Received];

        let context = match self.retrieve(query, &mut trace).await {
            Ok(context) => {
                trace.push(TurnState::ContextRetrieved);
                context
            }
            Err(e) => {
                tracing::warn!("Retrieval failed, continuing without context: {}", e);
                Vec::new()
            }
        };

        let context_values = context
            .iter()
            .map(ContextEntry::to_value)
            .collect::<Result<Vec<_>>>()?;

        trace.push(TurnState::GenerationCalled);
        let response = match self.generator.generate(messages, &context_values).await {
            Ok(text) => {
                trace.push(TurnState::Responded);
                text
            }
            Err(e) if e.is_config() => return Err(e),
            Err(e) => {
                tracing::error!("Generation failed: {}", e);
                trace.push(TurnState::ErrorResponded);
                APOLOGY_MESSAGE.to_string()
            }
        };

        tracing::debug!("Chat turn finished: {:?}", trace);
        Ok(ChatReply {
            response,
            context,
            trace,
        })
    }

    async fn retrieve(&self, query: &str, trace: &mut Vec<TurnState>) -> Result<Vec<ContextEntry>> {
        let limit = self.retrieval.keyword_row_limit;
        let keyword_context = |db: &SharedDatabase| -> Result<Vec<ContextEntry>> {
            let matches = db.with(|db| Ok(retrieve_by_keywords(db, query, limit)))?;
            Ok(matches.into_iter().map(ContextEntry::Table).collect())
        };

        match self.retrieval.mode {
            RetrievalMode::Keyword => keyword_context(&self.db),
            RetrievalMode::Embedding => {
                trace.push(TurnState::Embedding);
                let hits = self.embedding_hits(query).await?;
                Ok(hits)
            }
            RetrievalMode::Auto => {
                trace.push(TurnState::Embedding);
                match self.embedding_hits(query).await {
                    Ok(hits) if !hits.is_empty() => Ok(hits),
                    Ok(_) => {
                        tracing::debug!("No stored chunks matched, using keyword routing");
                        keyword_context(&self.db)
                    }
                    Err(e) => {
                        tracing::warn!("Embedding retrieval failed, using keyword routing: {}", e);
                        keyword_context(&self.db)
                    }
                }
            }
        }
    }

    async fn embedding_hits(&self, query: &str) -> Result<Vec<ContextEntry>> {
        let hits =
            retrieve_by_embedding(&self.db, self.embedder.as_ref(), query, &self.retrieval).await?;
        Ok(hits.into_iter().map(ContextEntry::Chunk).collect())
    }
}

/// Text of the last message, which must be non-empty
fn latest_text(messages: &[ChatMessage]) -> Result<&str> {
    let last = messages
        .last()
        .ok_or_else(|| CampusBotError::InvalidInput("No messages provided".to_string()))?;
    let text = last.text.trim();
    if text.is_empty() {
        return Err(CampusBotError::InvalidInput(
            "Latest message has no text".to_string(),
        ));
    }
    Ok(text)
}
