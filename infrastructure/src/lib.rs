//! Infrastructure layer for docchat
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: configuration loading, document loading and chunking,
//! the OpenAI-compatible model client, the in-memory vector index and the
//! condense-question query engine.

pub mod config;
pub mod credentials;
pub mod documents;
pub mod engine;
pub mod index;
pub mod logging;
pub mod openai;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, FileLlmConfig, FileReplConfig};
pub use credentials::{ApiKey, CredentialError, resolve_api_key};
pub use documents::{ChunkSplitter, FsDocumentLoader, SplitterError, TextChunk};
pub use engine::{CondenseQuestionEngine, LanguageModel, OpenAiEngineFactory, PromptMessage};
pub use index::{Embedder, EmbeddingIndexBuilder, InMemoryVectorIndex};
pub use logging::JsonlConversationLogger;
pub use openai::{OpenAiClient, OpenAiError};
