//! Progress notification port
//!
//! Defines the interface for reporting progress while the index is built.

/// Callback for progress updates during index construction
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait BuildProgressNotifier: Send + Sync {
    /// Called once documents have been read from the source
    fn on_documents_loaded(&self, documents: usize, chunks: usize);

    /// Called after each embedding batch
    fn on_chunks_embedded(&self, done: usize, total: usize);

    /// Called when the index is ready to serve queries
    fn on_index_ready(&self, chunks: usize);

    /// Called when construction failed
    fn on_index_failed(&self, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BuildProgressNotifier for NoProgress {
    fn on_documents_loaded(&self, _documents: usize, _chunks: usize) {}
    fn on_chunks_embedded(&self, _done: usize, _total: usize) {}
    fn on_index_ready(&self, _chunks: usize) {}
}
