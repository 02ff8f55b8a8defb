//! HTTP client for the Gemini generative language API

use super::prompt::{build_contents, Content, Part};
use super::{ChatMessage, Embedder, Generator};
use crate::config::GeminiConfig;
use crate::error::{CampusBotError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Reply used when the model returns no candidate text
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Gemini REST client implementing both collaborator traits
pub struct GeminiClient {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: &'a [Content],
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: String,
    content: EmbedContent<'a>,
}

#[derive(Serialize)]
struct EmbedContent<'a> {
    parts: [EmbedPart<'a>; 1],
}

#[derive(Serialize)]
struct EmbedPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: EmbedValues,
}

#[derive(Deserialize)]
struct EmbedValues {
    values: Vec<f32>,
}

impl GeminiClient {
    /// Create new client from configuration.
    ///
    /// A missing API key is not an error here; each call reports it instead.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| CampusBotError::Config("GEMINI_API_KEY is not set".to_string()))
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    async fn post<T: Serialize + ?Sized>(&self, url: &str, body: &T) -> Result<reqwest::Response> {
        let api_key = self.api_key()?;
        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error (HTTP {}): {}", status, body);
            return Err(CampusBotError::Upstream { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, messages: &[ChatMessage], context: &[Value]) -> Result<String> {
        let start = Instant::now();
        let contents = build_contents(messages, context)?;
        let url = self.endpoint(&self.config.chat_model, "generateContent");

        let response = self
            .post(&url, &GenerateRequest {
                contents: &contents,
            })
            .await?;
        let parsed: GenerateResponse = response.json().await?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|Part { text }| text)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| EMPTY_REPLY.to_string());

        tracing::debug!(
            "Generated {} chars with {} in {:?}",
            text.len(),
            self.config.chat_model,
            start.elapsed()
        );
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.config.chat_model
    }
}

#[async_trait]
impl Embedder for GeminiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(CampusBotError::InvalidInput(
                "No text provided for embedding".to_string(),
            ));
        }

        let model = &self.config.embedding_model;
        let url = self.endpoint(model, "embedContent");
        let request = EmbedRequest {
            model: format!("models/{}", model),
            content: EmbedContent {
                parts: [EmbedPart { text }],
            },
        };

        let response = self.post(&url, &request).await?;
        let parsed: EmbedResponse = response.json().await?;

        if parsed.embedding.values.is_empty() {
            return Err(CampusBotError::Llm("No embedding returned".to_string()));
        }
        if parsed.embedding.values.len() != self.dimensions() {
            return Err(CampusBotError::Llm(format!(
                "{} returned {} dimensions, expected {}",
                model,
                parsed.embedding.values.len(),
                self.dimensions()
            )));
        }
        Ok(parsed.embedding.values)
    }

    fn dimensions(&self) -> usize {
        self.config.embedding_dimensions
    }

    fn model_name(&self) -> &str {
        &self.config.embedding_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(base_url: &str, api_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            chat_model: "gemini-test".to_string(),
            embedding_model: "embed-test".to_string(),
            embedding_dimensions: 3,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_generate_returns_first_candidate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "candidates": [{"content": {"role": "model", "parts": [{"text": "There are four hostels."}]}}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = GeminiClient::new(config(&server.url(), Some("test-key"))).unwrap();
        let reply = client
            .generate(&[ChatMessage::user("What hostels are available?")], &[])
            .await
            .unwrap();

        assert_eq!(reply, "There are four hostels.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_without_candidates_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(config(&server.url(), Some("k"))).unwrap();
        let reply = client.generate(&[ChatMessage::user("hi")], &[]).await.unwrap();
        assert_eq!(reply, EMPTY_REPLY);
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .with_status(429)
            .with_body(r#"{"error": "quota"}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(config(&server.url(), Some("k"))).unwrap();
        let err = client.generate(&[ChatMessage::user("hi")], &[]).await.unwrap_err();
        assert!(matches!(err, CampusBotError::Upstream { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_embed_parses_values() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/embed-test:embedContent")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "models/embed-test",
                "content": {"parts": [{"text": "hostel fees"}]}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"embedding": {"values": [0.1, 0.2, 0.3]}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(config(&server.url(), Some("k"))).unwrap();
        let embedding = client.embed("hostel fees").await.unwrap();
        assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_embed_rejects_wrong_dimension() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/embed-test:embedContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"embedding": {"values": [0.1, 0.2]}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(config(&server.url(), Some("k"))).unwrap();
        let err = client.embed("hostel fees").await.unwrap_err();
        assert!(matches!(err, CampusBotError::Llm(ref msg) if msg.contains("expected 3")));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let client = GeminiClient::new(config("http://127.0.0.1:9", None)).unwrap();
        assert!(client.embed("hi").await.unwrap_err().is_config());
        assert!(client
            .generate(&[ChatMessage::user("hi")], &[])
            .await
            .unwrap_err()
            .is_config());
    }

    #[tokio::test]
    async fn test_embed_rejects_empty_text() {
        let client = GeminiClient::new(config("http://127.0.0.1:9", Some("k"))).unwrap();
        assert!(client.embed("   ").await.unwrap_err().is_invalid_input());
    }
}
