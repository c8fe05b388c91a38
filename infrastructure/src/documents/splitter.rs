//! Chunking of documents for embedding.

use docchat_domain::Document;
use text_splitter::{Characters, ChunkConfig, TextSplitter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitterError {
    #[error("invalid chunking (size {size}, overlap {overlap}): {reason}")]
    InvalidConfig {
        size: usize,
        overlap: usize,
        reason: String,
    },
}

/// A piece of a document, the unit of retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub document_id: String,
    pub text: String,
}

/// Splits documents at semantic boundaries (paragraphs, sentences, words)
/// into chunks of at most `size` characters, sharing `overlap` characters
/// between neighbours.
pub struct ChunkSplitter {
    splitter: TextSplitter<Characters>,
    size: usize,
    overlap: usize,
}

impl ChunkSplitter {
    pub fn new(size: usize, overlap: usize) -> Result<Self, SplitterError> {
        let invalid = |reason: String| SplitterError::InvalidConfig {
            size,
            overlap,
            reason,
        };
        if size == 0 {
            return Err(invalid("chunk size must be positive".to_string()));
        }
        let config = ChunkConfig::new(size)
            .with_overlap(overlap)
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            splitter: TextSplitter::new(config),
            size,
            overlap,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Split one document into chunks tagged with its id.
    pub fn split(&self, document: &Document) -> Vec<TextChunk> {
        self.splitter
            .chunks(document.content())
            .filter(|chunk| !chunk.trim().is_empty())
            .map(|chunk| TextChunk {
                document_id: document.id().to_string(),
                text: chunk.to_string(),
            })
            .collect()
    }

    /// Split every document, preserving document order.
    pub fn split_all(&self, documents: &[Document]) -> Vec<TextChunk> {
        documents.iter().flat_map(|doc| self.split(doc)).collect()
    }
}

impl std::fmt::Debug for ChunkSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkSplitter")
            .field("size", &self.size)
            .field("overlap", &self.overlap)
            .finish()
    }
}
