//! LLM trait definitions

use super::ChatMessage;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Embedding generation trait
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Reply generation trait
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate the assistant reply for a transcript, grounded in `context`
    async fn generate(&self, messages: &[ChatMessage], context: &[Value]) -> Result<String>;

    /// Get model name
    fn model_name(&self) -> &str;
}
