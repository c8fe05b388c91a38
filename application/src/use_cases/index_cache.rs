//! Process-wide, build-once index cache.

use crate::ports::index::{IndexBuilder, IndexError, RetrievalIndex};
use crate::ports::progress::BuildProgressNotifier;
use docchat_domain::DocumentSource;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

type BuildOutcome = Result<Arc<dyn RetrievalIndex>, IndexError>;

/// Holds the single retrieval index of the process.
///
/// The builder runs at most once per process. Concurrent first callers are
/// serialized by the cell: one runs the builder, the others wait for its
/// outcome. A failure is stored like a success and returned to every later
/// caller; the build is never retried.
#[derive(Default)]
pub struct IndexCache {
    cell: OnceCell<BuildOutcome>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached index, building it on first access.
    pub async fn get_or_build(
        &self,
        builder: &dyn IndexBuilder,
        source: &DocumentSource,
        progress: &dyn BuildProgressNotifier,
    ) -> BuildOutcome {
        self.cell
            .get_or_init(|| async {
                info!("Building index from {}", source);
                match builder.build(source, progress).await {
                    Ok(index) => {
                        info!("Index ready with {} chunks", index.len());
                        progress.on_index_ready(index.len());
                        Ok(index)
                    }
                    Err(e) => {
                        progress.on_index_failed(&e.to_string());
                        Err(e)
                    }
                }
            })
            .await
            .clone()
    }

    /// The index, if it has been built successfully.
    pub fn get(&self) -> Option<Arc<dyn RetrievalIndex>> {
        self.cell.get().and_then(|outcome| outcome.as_ref().ok().cloned())
    }

    pub fn is_built(&self) -> bool {
        self.get().is_some()
    }

    /// The stored build failure, if the one build attempt failed.
    pub fn failure(&self) -> Option<IndexError> {
        self.cell.get().and_then(|outcome| outcome.as_ref().err().cloned())
    }
}
