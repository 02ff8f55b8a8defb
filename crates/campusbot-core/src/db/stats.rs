//! Database statistics

use super::Database;
use crate::error::Result;
use crate::tables::TABLES;
use std::collections::BTreeMap;

/// Database stats
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatabaseStats {
    pub chunk_count: usize,
    pub source_document_count: usize,
    /// Chunks per source table
    pub chunks_by_source: BTreeMap<String, usize>,
    /// Rows per domain table
    pub table_rows: BTreeMap<String, usize>,
    /// Registered embedding models and their dimensions
    pub models: BTreeMap<String, usize>,
}

impl Database {
    /// Get database statistics
    pub fn get_stats(&self) -> Result<DatabaseStats> {
        let chunk_count = self.count_chunks()?;

        let source_document_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM source_documents", [], |row| row.get(0))?;

        let mut chunks_by_source = BTreeMap::new();
        {
            let mut stmt = self.conn.prepare(
                "SELECT source_table, COUNT(*) FROM documents GROUP BY source_table",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            for row in rows {
                let (table, count) = row?;
                chunks_by_source.insert(table, count as usize);
            }
        }

        let mut table_rows = BTreeMap::new();
        for table in TABLES {
            table_rows.insert(table.name.to_string(), self.count_rows(table)?);
        }

        let mut models = BTreeMap::new();
        {
            let mut stmt = self
                .conn
                .prepare("SELECT model, dimensions FROM model_metadata")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            for row in rows {
                let (model, dims) = row?;
                models.insert(model, dims as usize);
            }
        }

        Ok(DatabaseStats {
            chunk_count,
            source_document_count: source_document_count as usize,
            chunks_by_source,
            table_rows,
            models,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewChunk;
    use crate::tables::SOURCE_DOCUMENTS_TABLE;

    #[test]
    fn test_stats_counts() {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let source = db.insert_source_document("a.txt", "uploads/a.txt").unwrap();
        db.insert_chunk(&NewChunk {
            content: "hello",
            embedding: &[1.0, 2.0],
            model: "m",
            source_table: SOURCE_DOCUMENTS_TABLE,
            source_id: source,
        })
        .unwrap();

        let stats = db.get_stats().unwrap();
        assert_eq!(stats.chunk_count, 1);
        assert_eq!(stats.source_document_count, 1);
        assert_eq!(stats.chunks_by_source.get(SOURCE_DOCUMENTS_TABLE), Some(&1));
        assert_eq!(stats.table_rows.get("hostels"), Some(&0));
        assert_eq!(stats.models.get("m"), Some(&2));
    }
}
