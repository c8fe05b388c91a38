//! Retrieval index ports
//!
//! Defines how the application obtains a queryable index over the corpus.
//! Parsing, chunking, embedding and similarity search all live behind these
//! traits in the infrastructure layer.

use super::progress::BuildProgressNotifier;
use async_trait::async_trait;
use docchat_domain::DocumentSource;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building or querying an index
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("No documents found in {0}")]
    NoDocuments(String),

    #[error("Could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Index error: {0}")]
    Other(String),
}

impl IndexError {
    /// True for the data-load class of failures (empty or unreadable source).
    pub fn is_data_load(&self) -> bool {
        matches!(
            self,
            IndexError::NoDocuments(_) | IndexError::Unreadable { .. }
        )
    }
}

/// A chunk returned by similarity search
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    /// Id of the document the chunk came from.
    pub document_id: String,
    pub text: String,
    /// Similarity score, higher is closer.
    pub score: f32,
}

/// A built, read-only retrieval index
///
/// Shared by every session in the process, so implementations must be safe
/// for concurrent reads.
#[async_trait]
pub trait RetrievalIndex: Send + Sync {
    /// Return up to `top_k` chunks most similar to `query`, best first.
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedChunk>, IndexError>;

    /// Number of chunks held by the index.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a [`RetrievalIndex`] from a document source
#[async_trait]
pub trait IndexBuilder: Send + Sync {
    async fn build(
        &self,
        source: &DocumentSource,
        progress: &dyn BuildProgressNotifier,
    ) -> Result<Arc<dyn RetrievalIndex>, IndexError>;
}
