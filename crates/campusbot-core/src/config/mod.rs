//! Configuration management

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// SQLite database path (falls back to `CAMPUSBOT_DB`, then the cache dir)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Gemini API configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Chunking configuration for ingestion
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Gemini REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL of the generative language API
    #[serde(default = "default_gemini_url")]
    pub base_url: String,

    /// API key; every Gemini call fails with a configuration error without it
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for chat generation
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Output dimension of the embedding model
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_url(),
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: default_embedding_dimensions(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_gemini_url() -> String {
    std::env::var("CAMPUSBOT_GEMINI_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string())
}

fn default_chat_model() -> String {
    std::env::var("CAMPUSBOT_CHAT_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("CAMPUSBOT_EMBEDDING_MODEL").unwrap_or_else(|_| "embedding-001".to_string())
}

fn default_embedding_dimensions() -> usize {
    768
}

fn default_timeout() -> u64 {
    30
}

/// How a chat turn gathers context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Keyword routing over the domain tables only
    Keyword,
    /// Nearest-neighbour search over stored chunks only
    Embedding,
    /// Embedding search, falling back to keyword routing when it yields nothing
    #[default]
    Auto,
}

/// Distance used to order stored chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `1 - cosine similarity`
    #[default]
    Cosine,
    Euclidean,
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    #[serde(default)]
    pub mode: RetrievalMode,

    /// Number of chunks returned by vector search
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Rows fetched per table in keyword mode
    #[serde(default = "default_row_limit")]
    pub keyword_row_limit: usize,

    #[serde(default)]
    pub distance: DistanceMetric,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            mode: RetrievalMode::default(),
            top_k: default_top_k(),
            keyword_row_limit: default_row_limit(),
            distance: DistanceMetric::default(),
        }
    }
}

fn default_top_k() -> usize {
    5
}

fn default_row_limit() -> usize {
    3
}

/// Chunking configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between consecutive chunks
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

fn default_chunk_size() -> usize {
    crate::index::DEFAULT_CHUNK_SIZE
}

fn default_overlap() -> usize {
    crate::index::DEFAULT_CHUNK_OVERLAP
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_cors")]
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            cors_enabled: default_cors(),
        }
    }
}

fn default_listen_addr() -> String {
    std::env::var("CAMPUSBOT_LISTEN").unwrap_or_else(|_| "127.0.0.1:3000".to_string())
}

fn default_cors() -> bool {
    true
}

impl Config {
    /// Load config from `CAMPUSBOT_CONFIG` or the default path
    pub fn load() -> Result<Self> {
        let path = std::env::var("CAMPUSBOT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        Self::load_from(&path)
    }

    /// Load config from a specific path, using defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };

        // An environment key wins over an empty file entry
        if config.gemini.api_key.is_none() {
            config.gemini.api_key = GeminiConfig::default().api_key;
        }
        Ok(config)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Resolve the database path: config file, then `CAMPUSBOT_DB`, then the cache dir
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .or_else(|| std::env::var("CAMPUSBOT_DB").ok().map(PathBuf::from))
            .unwrap_or_else(crate::db::Database::default_path)
    }
}
