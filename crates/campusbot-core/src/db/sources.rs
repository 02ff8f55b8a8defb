//! Source document records and chunk source validation

use super::Database;
use crate::error::{CampusBotError, Result};
use crate::tables::{find_table, SOURCE_DOCUMENTS_TABLE};
use chrono::Utc;
use rusqlite::params;
use serde::Serialize;

/// An ingested file or uploaded text blob
#[derive(Debug, Clone, Serialize)]
pub struct SourceDocument {
    pub id: i64,
    pub filename: String,
    pub storage_path: String,
    pub created_at: String,
}

impl Database {
    /// Record a source document, returning its id
    pub fn insert_source_document(&self, filename: &str, storage_path: &str) -> Result<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO source_documents (filename, storage_path, created_at)
             VALUES (?1, ?2, ?3)",
            params![filename, storage_path, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a source document by id
    pub fn get_source_document(&self, id: i64) -> Result<Option<SourceDocument>> {
        let result = self.conn.query_row(
            "SELECT id, filename, storage_path, created_at FROM source_documents WHERE id = ?1",
            params![id],
            |row| {
                Ok(SourceDocument {
                    id: row.get(0)?,
                    filename: row.get(1)?,
                    storage_path: row.get(2)?,
                    created_at: row.get(3)?,
                })
            },
        );

        match result {
            Ok(doc) => Ok(Some(doc)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Check that `table`/`id` names an existing source row
    pub fn ensure_source_exists(&self, table: &str, id: i64) -> Result<()> {
        let exists = if table == SOURCE_DOCUMENTS_TABLE {
            self.get_source_document(id)?.is_some()
        } else {
            let spec = find_table(table)
                .ok_or_else(|| CampusBotError::TableNotFound(table.to_string()))?;
            self.row_exists(spec, id)?
        };

        if exists {
            Ok(())
        } else {
            Err(CampusBotError::SourceNotFound {
                table: table.to_string(),
                id,
            })
        }
    }
}
