//! Chunk storage and nearest-neighbour search

use super::vectors::{bytes_to_embedding, distance, embedding_to_bytes};
use super::Database;
use crate::config::DistanceMetric;
use crate::error::{CampusBotError, Result};
use chrono::Utc;
use rusqlite::params;
use serde::Serialize;

/// Chunk to be stored
#[derive(Debug, Clone)]
pub struct NewChunk<'a> {
    pub content: &'a str,
    pub embedding: &'a [f32],
    pub model: &'a str,
    pub source_table: &'a str,
    pub source_id: i64,
}

/// Stored chunk (embedding omitted)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredChunk {
    pub id: i64,
    pub content: String,
    pub source_table: String,
    pub source_id: i64,
    pub created_at: String,
}

/// Search hit with its distance to the query
#[derive(Debug, Clone, Serialize)]
pub struct ScoredChunk {
    #[serde(flatten)]
    pub chunk: StoredChunk,
    pub distance: f32,
}

impl Database {
    /// Insert a chunk with its embedding.
    ///
    /// Rejects empty embeddings, dangling sources, and embeddings whose length
    /// differs from the dimension already registered for the model.
    pub fn insert_chunk(&self, chunk: &NewChunk<'_>) -> Result<i64> {
        if chunk.embedding.is_empty() {
            return Err(CampusBotError::InvalidInput(
                "Embedding must not be empty".to_string(),
            ));
        }
        self.ensure_source_exists(chunk.source_table, chunk.source_id)?;

        let dims = chunk.embedding.len();
        match self.get_model_dimensions(chunk.model)? {
            Some(expected) if expected != dims => {
                return Err(CampusBotError::DimensionMismatch {
                    model: chunk.model.to_string(),
                    expected,
                    actual: dims,
                })
            }
            _ => {}
        }

        let now = Utc::now().to_rfc3339();
        let embedding_bytes = embedding_to_bytes(chunk.embedding);

        self.conn.execute("BEGIN IMMEDIATE", [])?;
        let result = (|| {
            self.register_model(chunk.model, dims)?;
            self.conn.execute(
                "INSERT INTO documents (content, embedding, model, source_table, source_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    chunk.content,
                    embedding_bytes,
                    chunk.model,
                    chunk.source_table,
                    chunk.source_id,
                    now
                ],
            )?;
            Ok(self.conn.last_insert_rowid())
        })();

        if result.is_ok() {
            self.conn.execute("COMMIT", [])?;
        } else {
            let _ = self.conn.execute("ROLLBACK", []);
        }
        result
    }

    /// Get a stored chunk by id
    pub fn get_chunk(&self, id: i64) -> Result<Option<StoredChunk>> {
        let result = self.conn.query_row(
            "SELECT id, content, source_table, source_id, created_at FROM documents WHERE id = ?1",
            params![id],
            |row| {
                Ok(StoredChunk {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    source_table: row.get(2)?,
                    source_id: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        );

        match result {
            Ok(chunk) => Ok(Some(chunk)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Chunks stored for one source row, in insertion order
    pub fn get_chunks_for_source(&self, table: &str, id: i64) -> Result<Vec<StoredChunk>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, content, source_table, source_id, created_at FROM documents
             WHERE source_table = ?1 AND source_id = ?2 ORDER BY id",
        )?;
        let chunks = stmt
            .query_map(params![table, id], |row| {
                Ok(StoredChunk {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    source_table: row.get(2)?,
                    source_id: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(chunks)
    }

    /// The `k` stored chunks closest to `query`, by ascending distance.
    ///
    /// Stored embeddings whose length differs from the query are skipped.
    pub fn search_similar(
        &self,
        query: &[f32],
        k: usize,
        metric: DistanceMetric,
    ) -> Result<Vec<ScoredChunk>> {
        if query.is_empty() {
            return Err(CampusBotError::InvalidInput(
                "Query embedding must not be empty".to_string(),
            ));
        }

        let stored = self.get_all_embeddings()?;
        let total = stored.len();

        let mut distances: Vec<(i64, f32)> = stored
            .into_iter()
            .filter(|(_, embedding)| embedding.len() == query.len())
            .map(|(id, embedding)| (id, distance(metric, query, &embedding)))
            .collect();

        if distances.len() < total {
            tracing::debug!(
                "Skipped {} chunks with dimension != {}",
                total - distances.len(),
                query.len()
            );
        }

        // NaN distances sort after every finite one
        distances.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        let mut results = Vec::with_capacity(k.min(distances.len()));
        for (id, dist) in distances.into_iter().take(k) {
            if let Some(chunk) = self.get_chunk(id)? {
                results.push(ScoredChunk {
                    chunk,
                    distance: dist,
                });
            }
        }

        Ok(results)
    }

    /// Number of stored chunks
    pub fn count_chunks(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Read back a stored embedding (for diagnostics and tests)
    pub fn get_chunk_embedding(&self, id: i64) -> Result<Option<Vec<f32>>> {
        let result = self.conn.query_row(
            "SELECT embedding FROM documents WHERE id = ?1",
            params![id],
            |row| row.get::<_, Vec<u8>>(0),
        );

        match result {
            Ok(bytes) => Ok(Some(bytes_to_embedding(&bytes))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
