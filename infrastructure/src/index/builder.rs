//! Index construction: load, split, embed.

use super::embedder::Embedder;
use super::memory::{InMemoryVectorIndex, IndexEntry};
use crate::documents::{ChunkSplitter, FsDocumentLoader};
use async_trait::async_trait;
use docchat_application::{BuildProgressNotifier, IndexBuilder, IndexError, RetrievalIndex};
use docchat_domain::{Document, DocumentSource};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_EMBED_BATCH_SIZE: usize = 64;

/// Builds an [`InMemoryVectorIndex`] from documents on disk.
///
/// File reading and splitting run on the blocking pool; embedding requests
/// are sent in batches of `batch_size` chunks, reporting progress after each.
pub struct EmbeddingIndexBuilder {
    loader: FsDocumentLoader,
    splitter: Arc<ChunkSplitter>,
    embedder: Arc<dyn Embedder>,
    batch_size: usize,
}

impl EmbeddingIndexBuilder {
    pub fn new(splitter: ChunkSplitter, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            loader: FsDocumentLoader::new(),
            splitter: Arc::new(splitter),
            embedder,
            batch_size: DEFAULT_EMBED_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

#[async_trait]
impl IndexBuilder for EmbeddingIndexBuilder {
    async fn build(
        &self,
        source: &DocumentSource,
        progress: &dyn BuildProgressNotifier,
    ) -> Result<Arc<dyn RetrievalIndex>, IndexError> {
        let loader = self.loader.clone();
        let splitter = Arc::clone(&self.splitter);
        let owned_source = source.clone();

        let (document_count, text_chunks) = tokio::task::spawn_blocking(move || {
            let documents = dedupe(loader.load(&owned_source)?);
            let text_chunks = splitter.split_all(&documents);
            Ok::<_, IndexError>((documents.len(), text_chunks))
        })
        .await
        .map_err(|e| IndexError::Other(format!("document loading task failed: {}", e)))??;

        if text_chunks.is_empty() {
            return Err(IndexError::NoDocuments(source.to_string()));
        }
        info!(
            "Loaded {} documents ({} chunks) from {}",
            document_count,
            text_chunks.len(),
            source
        );
        progress.on_documents_loaded(document_count, text_chunks.len());

        let total = text_chunks.len();
        let mut entries = Vec::with_capacity(total);
        for batch in text_chunks.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
            let vectors = self.embedder.embed(&texts).await?;
            if vectors.len() != batch.len() {
                return Err(IndexError::Embedding(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    vectors.len()
                )));
            }
            entries.extend(batch.iter().zip(vectors).map(|(chunk, embedding)| IndexEntry {
                document_id: chunk.document_id.clone(),
                text: chunk.text.clone(),
                embedding,
            }));
            debug!("Embedded {}/{} chunks", entries.len(), total);
            progress.on_chunks_embedded(entries.len(), total);
        }

        Ok(Arc::new(InMemoryVectorIndex::new(
            entries,
            Arc::clone(&self.embedder),
        )))
    }
}

/// Drop documents whose content hash was already seen.
fn dedupe(documents: Vec<Document>) -> Vec<Document> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .filter(|doc| {
            let fresh = seen.insert(doc.hash().to_string());
            if !fresh {
                debug!("Skipping duplicate document {}", doc.id());
            }
            fresh
        })
        .collect()
}
