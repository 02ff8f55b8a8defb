//! Embed every row of every domain table into the chunk store

use crate::db::{DomainRecord, NewChunk, SharedDatabase};
use crate::error::Result;
use crate::llm::Embedder;
use crate::tables::{TableSpec, TABLES};
use serde::Serialize;
use serde_json::Value;

/// Population statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct PopulateReport {
    pub inserted: usize,
    /// Rows with no renderable content
    pub skipped: usize,
    pub failed: usize,
}

/// Render a row as `field: value` pairs joined by `". "`.
///
/// Null, empty, `false` and zero values are left out; arrays are joined with `", "`.
pub fn render_record(table: &TableSpec, record: &DomainRecord) -> String {
    table
        .fields
        .iter()
        .filter_map(|field| {
            let value = render_value(record.get(*field)?)?;
            Some(format!("{}: {}", field, value))
        })
        .collect::<Vec<_>>()
        .join(". ")
}

fn render_value(value: &Value) -> Option<String> {
    let rendered = match value {
        Value::Null | Value::Bool(false) => return None,
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    };
    (!rendered.is_empty()).then_some(rendered)
}

/// Embed all domain rows, one at a time.
///
/// A table that cannot be read is skipped; rows that fail to embed or
/// store are counted as failed.
pub async fn populate_embeddings(
    db: &SharedDatabase,
    embedder: &dyn Embedder,
) -> Result<PopulateReport> {
    let mut report = PopulateReport::default();

    for table in TABLES {
        let rows = match db.with(|db| db.all_rows(table)) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!("Reading {} failed, skipping table: {}", table.name, e);
                continue;
            }
        };
        tracing::info!("Populating {} rows from {}", rows.len(), table.name);

        for record in &rows {
            let Some(id) = record.get("id").and_then(Value::as_i64) else {
                report.skipped += 1;
                continue;
            };

            let content = render_record(table, record);
            if content.is_empty() {
                tracing::debug!("{}/{} has no content, skipping", table.name, id);
                report.skipped += 1;
                continue;
            }

            let embedding = match embedder.embed(&content).await {
                Ok(embedding) => embedding,
                Err(e) => {
                    tracing::warn!("Embedding {}/{} failed: {}", table.name, id, e);
                    report.failed += 1;
                    continue;
                }
            };

            let inserted = db.with(|db| {
                db.insert_chunk(&NewChunk {
                    content: &content,
                    embedding: &embedding,
                    model: embedder.model_name(),
                    source_table: table.name,
                    source_id: id,
                })
            });

            match inserted {
                Ok(_) => report.inserted += 1,
                Err(e) => {
                    tracing::warn!("Storing {}/{} failed: {}", table.name, id, e);
                    report.failed += 1;
                }
            }
        }
    }

    Ok(report)
}
