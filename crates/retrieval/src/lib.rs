pub mod embeddings;
pub mod vector;

pub use embeddings::EmbeddingClient;
pub use vector::{RetrievedPassage, VectorIndexClient};

use anyhow::{Context, Result};

/// Top-k semantic search over the document index. `top_k` is fixed when the
/// retriever is built, not per request.
pub struct DocumentRetriever {
    embeddings: EmbeddingClient,
    index: VectorIndexClient,
    top_k: usize,
}

impl DocumentRetriever {
    pub fn new(embeddings: EmbeddingClient, index: VectorIndexClient, top_k: usize) -> Self {
        Self {
            embeddings,
            index,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Embed the question and return the best-matching passages in
    /// descending similarity order. An unreachable index is an error for the
    /// caller to handle, never an empty result.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedPassage>> {
        let query_embedding = self
            .embeddings
            .embed(question)
            .await
            .context("Failed to embed question")?;

        self.index
            .search(query_embedding, self.top_k)
            .await
            .context("Failed to search document index")
    }
}
