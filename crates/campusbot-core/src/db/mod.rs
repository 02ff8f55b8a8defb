//! Database layer for campusbot
//!
//! Provides SQLite-based storage with:
//! - Chunk storage with embeddings as BLOBs
//! - Source documents for ingested text
//! - The structured domain tables

mod chunks;
mod domain;
mod schema;
mod shared;
mod sources;
mod stats;
pub mod vectors;

pub use chunks::{NewChunk, ScoredChunk, StoredChunk};
pub use domain::DomainRecord;
pub use schema::Database;
pub use shared::SharedDatabase;
pub use sources::SourceDocument;
pub use stats::DatabaseStats;
use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("campusbot.sqlite")
    }
}
