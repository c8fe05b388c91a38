//! Vector index adapters.

mod builder;
mod embedder;
mod memory;

pub use builder::{DEFAULT_EMBED_BATCH_SIZE, EmbeddingIndexBuilder};
pub use embedder::Embedder;
pub use memory::{InMemoryVectorIndex, IndexEntry, cosine_similarity};
