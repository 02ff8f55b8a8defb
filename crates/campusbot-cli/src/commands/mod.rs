//! CLI command handlers

pub mod chat;
pub mod ingest;
pub mod load;
pub mod populate;
pub mod route;
pub mod search;
pub mod serve;
pub mod status;

use anyhow::Result;
use campusbot_core::{CampusBotError, Config, GeminiClient};
use std::sync::Arc;

/// Gemini client for commands that cannot do anything useful without a key
pub(crate) fn gemini_client(config: &Config) -> Result<Arc<GeminiClient>> {
    if config.gemini.api_key.is_none() {
        return Err(CampusBotError::Config(
            "GEMINI_API_KEY is not set; export it or add gemini.api_key to the config file"
                .to_string(),
        )
        .into());
    }
    Ok(Arc::new(GeminiClient::new(config.gemini.clone())?))
}

/// Single-line preview of stored content
pub(crate) fn preview(content: &str, max_chars: usize) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
