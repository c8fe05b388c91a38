//! Process-lifetime context shared by every session.

use super::chat_session::ChatSession;
use super::index_cache::IndexCache;
use crate::config::SessionConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::index::{IndexBuilder, IndexError, RetrievalIndex};
use crate::ports::progress::{BuildProgressNotifier, NoProgress};
use crate::ports::query_engine::{QueryEngine, QueryEngineFactory};
use docchat_domain::DocumentSource;
use std::sync::Arc;
use tracing::debug;

/// Owns the collaborators and the cached index for the whole process.
///
/// Constructed once at startup and shared behind an `Arc`; sessions borrow
/// the index through it and never build their own.
pub struct AppContext {
    builder: Arc<dyn IndexBuilder>,
    factory: Arc<dyn QueryEngineFactory>,
    source: DocumentSource,
    config: SessionConfig,
    index: IndexCache,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AppContext {
    pub fn new(
        builder: Arc<dyn IndexBuilder>,
        factory: Arc<dyn QueryEngineFactory>,
        source: DocumentSource,
        config: SessionConfig,
    ) -> Self {
        Self {
            builder,
            factory,
            source,
            config,
            index: IndexCache::new(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn conversation_logger(&self) -> &dyn ConversationLogger {
        self.conversation_logger.as_ref()
    }

    /// The shared index, built on first call.
    pub async fn index(&self) -> Result<Arc<dyn RetrievalIndex>, IndexError> {
        self.index_with_progress(&NoProgress).await
    }

    /// Like [`index`](Self::index), reporting build progress if a build runs.
    pub async fn index_with_progress(
        &self,
        progress: &dyn BuildProgressNotifier,
    ) -> Result<Arc<dyn RetrievalIndex>, IndexError> {
        let progress = LoggedProgress {
            inner: progress,
            logger: self.conversation_logger.as_ref(),
            source: &self.source,
        };
        self.index
            .get_or_build(self.builder.as_ref(), &self.source, &progress)
            .await
    }

    pub fn is_index_built(&self) -> bool {
        self.index.is_built()
    }

    /// Start a new session seeded with the configured greeting.
    pub fn new_session(&self) -> ChatSession {
        let session = ChatSession::new(self.config.greeting.clone());
        debug!("Session {} created", session.id());
        session
    }

    pub(crate) fn create_engine(&self, index: Arc<dyn RetrievalIndex>) -> Box<dyn QueryEngine> {
        self.factory.create_engine(index, self.config.engine)
    }
}

/// Forwards build progress and records build outcomes in the conversation log.
struct LoggedProgress<'a> {
    inner: &'a dyn BuildProgressNotifier,
    logger: &'a dyn ConversationLogger,
    source: &'a DocumentSource,
}

impl BuildProgressNotifier for LoggedProgress<'_> {
    fn on_documents_loaded(&self, documents: usize, chunks: usize) {
        self.inner.on_documents_loaded(documents, chunks);
    }

    fn on_chunks_embedded(&self, done: usize, total: usize) {
        self.inner.on_chunks_embedded(done, total);
    }

    fn on_index_ready(&self, chunks: usize) {
        self.logger.log(ConversationEvent::new(
            "index_ready",
            serde_json::json!({
                "source": self.source.to_string(),
                "chunks": chunks,
            }),
        ));
        self.inner.on_index_ready(chunks);
    }

    fn on_index_failed(&self, reason: &str) {
        self.logger.log(ConversationEvent::new(
            "index_failed",
            serde_json::json!({
                "source": self.source.to_string(),
                "error": reason,
            }),
        ));
        self.inner.on_index_failed(reason);
    }
}
