//! Retrieval configuration from TOML (`[retrieval]` section)

use docchat_domain::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};

/// Raw retrieval and indexing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Chunks retrieved per question
    pub top_k: usize,
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// Characters shared by neighbouring chunks
    pub chunk_overlap: usize,
    /// Chunks sent per embedding request
    pub embed_batch_size: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            chunk_size: 1024,
            chunk_overlap: 128,
            embed_batch_size: 64,
        }
    }
}
