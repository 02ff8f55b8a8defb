//! Campusbot Core Library
//!
//! Retrieval-augmented chat for a university information assistant.
//!
//! # Features
//! - Sentence and paragraph aware text chunking
//! - SQLite storage for chunks, source documents and domain tables
//! - Vector similarity search over stored chunk embeddings
//! - Keyword routing over structured domain tables
//! - Gemini-backed embedding and generation

pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod llm;
pub mod search;
pub mod tables;

pub use chat::{ChatReply, ChatService, TurnState};
pub use config::{
    ChunkingConfig, Config, DistanceMetric, GeminiConfig, RetrievalConfig, RetrievalMode,
    ServerConfig,
};
pub use db::{Database, DomainRecord, ScoredChunk, SharedDatabase, StoredChunk};
pub use error::{CampusBotError, Error, Result};
pub use index::{
    chunk_spans, chunk_text, ingest_directory, ingest_text, populate_embeddings, IngestReport,
    PopulateReport,
};
pub use llm::{ChatMessage, Embedder, GeminiClient, Generator, Sender};
pub use search::{select_tables, ContextEntry, TableMatches, TableSource};
pub use tables::{find_table, TableSpec, SOURCE_DOCUMENTS_TABLE, TABLES};

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "campusbot";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "campusbot";

/// Apology returned to the user when the generation step fails
pub const APOLOGY_MESSAGE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";
