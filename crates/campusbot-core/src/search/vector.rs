//! Embedding-mode retrieval over stored chunks

use crate::config::RetrievalConfig;
use crate::db::{ScoredChunk, SharedDatabase};
use crate::error::Result;
use crate::llm::Embedder;

/// Embed `query` and return the closest stored chunks
pub async fn retrieve_by_embedding(
    db: &SharedDatabase,
    embedder: &dyn Embedder,
    query: &str,
    config: &RetrievalConfig,
) -> Result<Vec<ScoredChunk>> {
    let embedding = embedder.embed(query).await?;
    let hits = db.with(|db| db.search_similar(&embedding, config.top_k, config.distance))?;
    tracing::debug!("{} chunks retrieved for query", hits.len());
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewChunk};
    use crate::error::CampusBotError;
    use crate::tables::SOURCE_DOCUMENTS_TABLE;
    use async_trait::async_trait;

    struct FixedEmbedder(Vec<f32>);

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }

        fn dimensions(&self) -> usize {
            self.0.len()
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(CampusBotError::Llm("offline".to_string()))
        }

        fn dimensions(&self) -> usize {
            2
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    fn seeded() -> SharedDatabase {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let source = db.insert_source_document("guide.txt", "uploads/guide.txt").unwrap();
        for (content, embedding) in [("library", [1.0, 0.0]), ("canteen", [0.0, 1.0])] {
            db.insert_chunk(&NewChunk {
                content,
                embedding: &embedding,
                model: "fixed",
                source_table: SOURCE_DOCUMENTS_TABLE,
                source_id: source,
            })
            .unwrap();
        }
        SharedDatabase::new(db)
    }

    #[tokio::test]
    async fn test_returns_closest_first() {
        let db = seeded();
        let config = RetrievalConfig::default();
        let hits = retrieve_by_embedding(&db, &FixedEmbedder(vec![0.1, 0.9]), "food", &config)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk.content, "canteen");
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let db = seeded();
        let config = RetrievalConfig::default();
        let result = retrieve_by_embedding(&db, &FailingEmbedder, "food", &config).await;
        assert!(result.is_err());
    }
}
