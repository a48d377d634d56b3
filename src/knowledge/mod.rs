//! The ingestion -> chunk -> embed -> index pipeline and the top-k search
//! over its result.
//!
//! Everything here is built once at startup.  Any build failure degrades to
//! an empty knowledge base: the bot answers without retrieved context rather
//! than refusing to start.

mod chunk;
mod document;
mod embedding;
mod index;

use crate::{config::Knowledge as KnowledgeConfig, log_error, log_internal};
use anyhow::Result;
use embedding::EmbeddingClient;
use index::VectorIndex;

pub struct KnowledgeBase {
    index: VectorIndex,
    embedder: EmbeddingClient,
    top_k: usize,
}

impl KnowledgeBase {
    /// A base with nothing indexed.  Searches return no context.
    pub fn empty(cfg: &KnowledgeConfig) -> Self {
        Self {
            index: VectorIndex::new(),
            embedder: EmbeddingClient::new(&cfg.embed_url, &cfg.embed_model),
            top_k: cfg.top_k,
        }
    }

    /// Build the index from the configured sources.  Never fails: indexing
    /// errors are logged and the bot continues with no knowledge.
    pub async fn build(cfg: &KnowledgeConfig) -> Self {
        match Self::try_build(cfg).await {
            Ok(knowledge) => knowledge,
            Err(err) => {
                log_error!("Knowledge indexing failed: {:#}; continuing without context", err);
                Self::empty(cfg)
            }
        }
    }

    async fn try_build(cfg: &KnowledgeConfig) -> Result<Self> {
        let folder = cfg.folder_path()?;
        log_internal!("Indexing knowledge from `{}`... ", folder.to_string_lossy());

        let documents = document::load_documents(&folder).await?;

        let mut chunks = Vec::new();
        for doc in &documents {
            chunks.extend(chunk::chunk_document(doc, cfg.chunk_size, cfg.chunk_overlap));
        }

        let embedder = EmbeddingClient::new(&cfg.embed_url, &cfg.embed_model);

        // With zero chunks this is a no-op, so an empty knowledge folder
        // doesn't require a reachable embedding server.
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        let mut index = VectorIndex::new();
        for (chunk, embedding) in chunks.into_iter().zip(embeddings) {
            index.insert(chunk, embedding);
        }

        log_internal!(
            "Indexing knowledge from `{}`... done ({} chunks from {} documents)",
            folder.to_string_lossy(),
            index.len(),
            documents.len(),
        );

        Ok(Self {
            index,
            embedder,
            top_k: cfg.top_k,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Embed the query and return the texts of the top-k nearest chunks.
    /// An empty base short-circuits to no context without a network call.
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        if self.index.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        Ok(self
            .index
            .search(&query_embedding, self.top_k)
            .into_iter()
            .map(|chunk| chunk.text.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_base_searches_without_network_access() {
        let cfg = KnowledgeConfig {
            // Nothing listens here; search must not need it
            embed_url: "http://127.0.0.1:1/api/embed".to_string(),
            ..KnowledgeConfig::default()
        };

        let knowledge = KnowledgeBase::empty(&cfg);
        assert!(knowledge.is_empty());
        assert_eq!(knowledge.search("anything").await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn build_with_missing_folder_yields_empty_base() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = KnowledgeConfig {
            folder: Some(dir.path().join("missing")),
            embed_url: "http://127.0.0.1:1/api/embed".to_string(),
            ..KnowledgeConfig::default()
        };

        let knowledge = KnowledgeBase::build(&cfg).await;
        assert!(knowledge.is_empty());
    }
}
