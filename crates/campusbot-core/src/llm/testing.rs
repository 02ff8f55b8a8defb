//! Deterministic collaborators for unit tests

use super::{ChatMessage, Embedder, Generator};
use crate::error::{CampusBotError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Letter-frequency embedder; fails for texts containing `fail_on`
pub(crate) struct StubEmbedder {
    pub dims: usize,
    pub fail_on: Option<&'static str>,
    pub calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(dims: usize, needle: &'static str) -> Self {
        Self {
            fail_on: Some(needle),
            ..Self::new(dims)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(needle) = self.fail_on {
            if text.contains(needle) {
                return Err(CampusBotError::Llm("embedding unavailable".to_string()));
            }
        }

        let mut embedding = vec![0.01; self.dims];
        for c in text.to_lowercase().chars().filter(|c| c.is_alphabetic()) {
            embedding[c as usize % self.dims] += 1.0;
        }
        Ok(embedding)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn model_name(&self) -> &str {
        "stub-embedder"
    }
}

pub(crate) enum Behaviour {
    Reply(&'static str),
    Fail,
    MissingKey,
}

/// Generator that records the context it was handed
pub(crate) struct StubGenerator {
    behaviour: Behaviour,
    pub seen_context: Mutex<Option<Vec<Value>>>,
}

impl StubGenerator {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            seen_context: Mutex::new(None),
        }
    }

    pub fn context(&self) -> Vec<Value> {
        self.seen_context.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl Generator for StubGenerator {
    async fn generate(&self, _messages: &[ChatMessage], context: &[Value]) -> Result<String> {
        *self.seen_context.lock().unwrap() = Some(context.to_vec());
        match self.behaviour {
            Behaviour::Reply(text) => Ok(text.to_string()),
            Behaviour::Fail => Err(CampusBotError::Upstream {
                status: 503,
                body: "unavailable".to_string(),
            }),
            Behaviour::MissingKey => Err(CampusBotError::Config(
                "GEMINI_API_KEY is not set".to_string(),
            )),
        }
    }

    fn model_name(&self) -> &str {
        "stub-generator"
    }
}
