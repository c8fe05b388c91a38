//! In-memory vector index.

use super::embedder::Embedder;
use async_trait::async_trait;
use docchat_application::{IndexError, RetrievalIndex, RetrievedChunk};
use std::sync::Arc;

/// A chunk and its embedding.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub document_id: String,
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Brute-force cosine-similarity index held in memory.
///
/// Read-only after construction, so one instance serves every session.
pub struct InMemoryVectorIndex {
    entries: Vec<IndexEntry>,
    embedder: Arc<dyn Embedder>,
}

impl InMemoryVectorIndex {
    pub fn new(entries: Vec<IndexEntry>, embedder: Arc<dyn Embedder>) -> Self {
        Self { entries, embedder }
    }

    /// Rank entries against an already-embedded query.
    pub fn search(&self, query: &[f32], top_k: usize) -> Vec<RetrievedChunk> {
        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|entry| (cosine_similarity(query, &entry.embedding), entry))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        scored
            .into_iter()
            .take(top_k)
            .map(|(score, entry)| RetrievedChunk {
                document_id: entry.document_id.clone(),
                text: entry.text.clone(),
                score,
            })
            .collect()
    }
}

#[async_trait]
impl RetrievalIndex for InMemoryVectorIndex {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>, IndexError> {
        if self.entries.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }
        let mut vectors = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = vectors
            .pop()
            .ok_or_else(|| IndexError::Embedding("no embedding returned for query".into()))?;
        Ok(self.search(&query_vector, top_k))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cosine similarity; 0.0 when either vector has no magnitude or lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
