//! Document loading and chunking.
//!
//! [`FsDocumentLoader`] reads text-like documentation files from disk;
//! [`ChunkSplitter`] cuts each document into overlapping chunks sized for
//! embedding.

mod loader;
mod splitter;

pub use loader::{FsDocumentLoader, SUPPORTED_EXTENSIONS};
pub use splitter::{ChunkSplitter, SplitterError, TextChunk};
