//! Error types for campusbot

use thiserror::Error;

/// Result type alias using CampusBotError
pub type Result<T> = std::result::Result<T, CampusBotError>;

/// Error type alias for convenience
pub type Error = CampusBotError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for campusbot
#[derive(Debug, Error)]
pub enum CampusBotError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Source not found: {table}/{id}")]
    SourceNotFound { table: String, id: i64 },

    #[error("Embedding dimension mismatch for {model}: expected {expected}, got {actual}")]
    DimensionMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream service error (HTTP {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CampusBotError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TableNotFound(_) | Self::SourceNotFound { .. } => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// Configuration errors fail a request instead of degrading it
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Missing or malformed caller input
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
