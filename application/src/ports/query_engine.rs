//! Query engine port
//!
//! A query engine answers one question at a time against the shared index,
//! keeping whatever conversation memory it needs for condensation.

use super::index::{IndexError, RetrievalIndex};
use async_trait::async_trait;
use docchat_domain::{EngineOptions, StreamEvent, StreamFailure};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors raised before a response stream could be opened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Model API error: {0}")]
    ModelApi(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] IndexError),
}

impl From<StreamFailure> for QueryError {
    fn from(failure: StreamFailure) -> Self {
        match failure {
            StreamFailure::ModelApi(msg) => QueryError::ModelApi(msg),
            StreamFailure::Transport(msg) => QueryError::Transport(msg),
        }
    }
}

/// Handle for receiving streaming events from a query engine.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`; the consumer pulls one event at
/// a time until a terminal event arrives.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Build a handle over a fixed list of events (useful for tests and
    /// non-streaming engines).
    pub fn from_events(events: Vec<StreamEvent>) -> Self {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            // Capacity covers every event, so this never fails.
            let _ = tx.try_send(event);
        }
        Self::new(rx)
    }

    /// Next event, or `None` once the producer has gone away.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// A session-scoped, conversation-aware query engine
#[async_trait]
pub trait QueryEngine: Send {
    /// Start answering `question`, returning a stream of fragments.
    ///
    /// The engine records the exchange in its own memory only once the
    /// stream completes successfully.
    async fn stream_query(&mut self, question: &str) -> Result<StreamHandle, QueryError>;
}

/// Creates query engines over a shared index
pub trait QueryEngineFactory: Send + Sync {
    fn create_engine(
        &self,
        index: Arc<dyn RetrievalIndex>,
        options: EngineOptions,
    ) -> Box<dyn QueryEngine>;
}
