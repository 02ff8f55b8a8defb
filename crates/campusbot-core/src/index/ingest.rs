//! Text ingestion: record a source document, chunk it, embed and store each chunk

use super::chunker::chunk_text;
use crate::config::ChunkingConfig;
use crate::db::{NewChunk, SharedDatabase};
use crate::error::{CampusBotError, Result};
use crate::llm::Embedder;
use crate::tables::SOURCE_DOCUMENTS_TABLE;
use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

/// Storage path prefix for files ingested from a local directory
pub const LOCAL_TXT_PREFIX: &str = "local_txt_files";

/// Ingestion statistics
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub documents: usize,
    pub chunks_inserted: usize,
    pub errors: usize,
}

impl IngestReport {
    fn merge(&mut self, other: &IngestReport) {
        self.documents += other.documents;
        self.chunks_inserted += other.chunks_inserted;
        self.errors += other.errors;
    }
}

/// Ingest one text blob.
///
/// All three fields must be non-empty. Chunks are embedded one at a time; a
/// chunk whose embedding or insert fails is logged, counted and skipped.
pub async fn ingest_text(
    db: &SharedDatabase,
    embedder: &dyn Embedder,
    filename: &str,
    storage_path: &str,
    text: &str,
    chunking: &ChunkingConfig,
) -> Result<IngestReport> {
    for (name, value) in [
        ("text", text),
        ("filename", filename),
        ("storagePath", storage_path),
    ] {
        if value.trim().is_empty() {
            return Err(CampusBotError::InvalidInput(format!("Missing {}", name)));
        }
    }

    let source_id = db.with(|db| db.insert_source_document(filename, storage_path))?;
    let chunks = chunk_text(text, chunking.chunk_size, chunking.overlap);
    tracing::info!("Ingesting {} as {} chunks", filename, chunks.len());

    let mut report = IngestReport {
        documents: 1,
        ..Default::default()
    };

    for (seq, content) in chunks.iter().enumerate() {
        let embedding = match embedder.embed(content).await {
            Ok(embedding) => embedding,
            Err(e) => {
                tracing::warn!("Embedding chunk {} of {} failed: {}", seq, filename, e);
                report.errors += 1;
                continue;
            }
        };

        let inserted = db.with(|db| {
            db.insert_chunk(&NewChunk {
                content,
                embedding: &embedding,
                model: embedder.model_name(),
                source_table: SOURCE_DOCUMENTS_TABLE,
                source_id,
            })
        });

        match inserted {
            Ok(_) => report.chunks_inserted += 1,
            Err(e) => {
                tracing::warn!("Storing chunk {} of {} failed: {}", seq, filename, e);
                report.errors += 1;
            }
        }
    }

    Ok(report)
}

/// Ingest every `*.txt` file directly inside `dir`
pub async fn ingest_directory(
    db: &SharedDatabase,
    embedder: &dyn Embedder,
    dir: &Path,
    chunking: &ChunkingConfig,
) -> Result<IngestReport> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "txt")
        {
            files.push(entry.into_path());
        }
    }

    tracing::info!("Found {} text files in {}", files.len(), dir.display());

    let mut report = IngestReport::default();
    for path in files {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Reading {} failed: {}", path.display(), e);
                report.errors += 1;
                continue;
            }
        };

        let storage_path = format!("{}/{}", LOCAL_TXT_PREFIX, filename);
        match ingest_text(db, embedder, &filename, &storage_path, &text, chunking).await {
            Ok(file_report) => report.merge(&file_report),
            Err(e) => {
                tracing::warn!("Ingesting {} failed: {}", filename, e);
                report.errors += 1;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::llm::testing::StubEmbedder;
    use tempfile::TempDir;

    fn shared_db() -> SharedDatabase {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        SharedDatabase::new(db)
    }

    fn small_chunks() -> ChunkingConfig {
        ChunkingConfig {
            chunk_size: 40,
            overlap: 5,
        }
    }

    #[tokio::test]
    async fn test_ingest_text_stores_chunks() {
        let db = shared_db();
        let embedder = StubEmbedder::new(8);
        let text = "The library opens at 8am. It closes at midnight.\n\nThe canteen serves lunch from noon.";

        let report = ingest_text(&db, &embedder, "guide.txt", "uploads/guide.txt", text, &small_chunks())
            .await
            .unwrap();

        assert_eq!(report.documents, 1);
        assert_eq!(report.errors, 0);
        assert!(report.chunks_inserted >= 2);
        assert_eq!(embedder.calls(), report.chunks_inserted);

        let stats = db.with(|db| db.get_stats()).unwrap();
        assert_eq!(stats.source_document_count, 1);
        assert_eq!(stats.chunk_count, report.chunks_inserted);
        assert_eq!(stats.chunks_by_source[SOURCE_DOCUMENTS_TABLE], report.chunks_inserted);
    }

    #[tokio::test]
    async fn test_ingest_text_requires_all_fields() {
        let db = shared_db();
        let embedder = StubEmbedder::new(4);
        let chunking = ChunkingConfig::default();

        for (filename, path, text) in [("", "p", "t"), ("f", "", "t"), ("f", "p", "  ")] {
            let err = ingest_text(&db, &embedder, filename, path, text, &chunking)
                .await
                .unwrap_err();
            assert!(err.is_invalid_input());
        }
        assert_eq!(db.with(|db| db.get_stats()).unwrap().source_document_count, 0);
    }

    #[tokio::test]
    async fn test_failed_chunks_are_counted_and_skipped() {
        let db = shared_db();
        let embedder = StubEmbedder::failing_on(4, "canteen");
        let text = "The library opens at 8am.\n\nThe canteen serves lunch from noon.";

        let report = ingest_text(&db, &embedder, "guide.txt", "uploads/guide.txt", text, &small_chunks())
            .await
            .unwrap();

        assert!(report.errors >= 1);
        assert!(report.chunks_inserted >= 1);
        assert_eq!(
            db.with(|db| db.count_chunks()).unwrap(),
            report.chunks_inserted
        );
    }

    #[tokio::test]
    async fn test_ingest_directory_reads_top_level_txt() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("admissions.txt"), "Apply online before June.").unwrap();
        std::fs::write(temp.path().join("hostels.txt"), "Four hostels on campus.").unwrap();
        std::fs::write(temp.path().join("notes.md"), "Not ingested.").unwrap();
        std::fs::create_dir(temp.path().join("nested")).unwrap();
        std::fs::write(temp.path().join("nested/deep.txt"), "Not ingested either.").unwrap();

        let db = shared_db();
        let embedder = StubEmbedder::new(4);
        let report = ingest_directory(&db, &embedder, temp.path(), &ChunkingConfig::default())
            .await
            .unwrap();

        assert_eq!(report.documents, 2);
        assert_eq!(report.chunks_inserted, 2);
        assert_eq!(report.errors, 0);

        let first = db.with(|db| db.get_source_document(1)).unwrap().unwrap();
        assert_eq!(first.filename, "admissions.txt");
        assert_eq!(first.storage_path, "local_txt_files/admissions.txt");
    }

    #[tokio::test]
    async fn test_reingesting_duplicates_chunks() {
        let db = shared_db();
        let embedder = StubEmbedder::new(4);
        let chunking = ChunkingConfig::default();
        for _ in 0..2 {
            ingest_text(&db, &embedder, "a.txt", "uploads/a.txt", "Same text.", &chunking)
                .await
                .unwrap();
        }
        assert_eq!(db.with(|db| db.count_chunks()).unwrap(), 2);
    }
}
