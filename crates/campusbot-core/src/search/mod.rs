//! Retrieval
//!
//! Provides:
//! - Keyword routing from query terms to domain tables
//! - Per-table lookups through the `TableSource` capability
//! - Nearest-neighbour search over stored chunk embeddings

mod keyword;
mod router;
mod vector;

pub use keyword::retrieve_by_keywords;
pub use router::{first_token, select_tables, DEFAULT_TABLES, KEYWORD_ROUTES};
pub use vector::retrieve_by_embedding;

use crate::db::{Database, DomainRecord, ScoredChunk};
use crate::error::Result;
use crate::tables::TableSpec;
use serde::Serialize;

/// Something that can answer substring lookups against a domain table
pub trait TableSource {
    fn lookup(&self, table: &TableSpec, token: &str, limit: usize) -> Result<Vec<DomainRecord>>;
}

impl TableSource for Database {
    fn lookup(&self, table: &TableSpec, token: &str, limit: usize) -> Result<Vec<DomainRecord>> {
        self.lookup_rows(table, token, limit)
    }
}

/// Rows matched in one table
#[derive(Debug, Clone, Serialize)]
pub struct TableMatches {
    pub table: String,
    pub rows: Vec<DomainRecord>,
}

/// One item of context handed to generation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContextEntry {
    Table(TableMatches),
    Chunk(ScoredChunk),
}

impl ContextEntry {
    /// JSON form passed to the generator
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
