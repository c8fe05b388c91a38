//! Test doubles for the application ports.

use crate::config::SessionConfig;
use crate::ports::chat_output::ChatOutput;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::index::{IndexBuilder, IndexError, RetrievalIndex, RetrievedChunk};
use crate::ports::progress::BuildProgressNotifier;
use crate::ports::query_engine::{QueryEngine, QueryEngineFactory, QueryError, StreamHandle};
use crate::use_cases::app_context::AppContext;
use async_trait::async_trait;
use docchat_domain::{ChatTurn, DocumentSource, EngineOptions, Role, StreamEvent};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ==================== Index ====================

pub(crate) struct StaticIndex {
    chunks: usize,
}

#[async_trait]
impl RetrievalIndex for StaticIndex {
    async fn retrieve(
        &self,
        _query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedChunk>, IndexError> {
        Ok((0..self.chunks.min(top_k))
            .map(|i| RetrievedChunk {
                document_id: i.to_string(),
                text: format!("chunk {i}"),
                score: 1.0,
            })
            .collect())
    }

    fn len(&self) -> usize {
        self.chunks
    }
}

pub(crate) struct CountingBuilder {
    calls: AtomicUsize,
    chunks: usize,
    fail: bool,
    delay: Option<Duration>,
}

impl CountingBuilder {
    pub(crate) fn new(chunks: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            chunks,
            fail: false,
            delay: None,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndexBuilder for CountingBuilder {
    async fn build(
        &self,
        source: &DocumentSource,
        progress: &dyn BuildProgressNotifier,
    ) -> Result<Arc<dyn RetrievalIndex>, IndexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(IndexError::NoDocuments(source.to_string()));
        }
        progress.on_documents_loaded(1, self.chunks);
        Ok(Arc::new(StaticIndex {
            chunks: self.chunks,
        }))
    }
}

// ==================== Query engine ====================

type Scripts = Arc<Mutex<VecDeque<Vec<StreamEvent>>>>;

pub(crate) struct ScriptedFactory {
    scripts: Scripts,
    questions: Arc<Mutex<Vec<String>>>,
    engines: AtomicUsize,
    failure: Option<QueryError>,
}

impl ScriptedFactory {
    /// Each `stream_query` call plays the next script, across all engines.
    pub(crate) fn new(scripts: Vec<Vec<StreamEvent>>) -> Self {
        Self {
            scripts: Arc::new(Mutex::new(VecDeque::from(scripts))),
            questions: Arc::new(Mutex::new(Vec::new())),
            engines: AtomicUsize::new(0),
            failure: None,
        }
    }

    /// Every `stream_query` call fails before streaming.
    pub(crate) fn failing_with(mut self, error: QueryError) -> Self {
        self.failure = Some(error);
        self
    }

    pub(crate) fn engines_created(&self) -> usize {
        self.engines.load(Ordering::SeqCst)
    }

    pub(crate) fn queries(&self) -> usize {
        self.questions.lock().unwrap().len()
    }

    pub(crate) fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl QueryEngineFactory for ScriptedFactory {
    fn create_engine(
        &self,
        _index: Arc<dyn RetrievalIndex>,
        _options: EngineOptions,
    ) -> Box<dyn QueryEngine> {
        self.engines.fetch_add(1, Ordering::SeqCst);
        Box::new(ScriptedEngine {
            scripts: Arc::clone(&self.scripts),
            questions: Arc::clone(&self.questions),
            failure: self.failure.clone(),
        })
    }
}

struct ScriptedEngine {
    scripts: Scripts,
    questions: Arc<Mutex<Vec<String>>>,
    failure: Option<QueryError>,
}

#[async_trait]
impl QueryEngine for ScriptedEngine {
    async fn stream_query(&mut self, question: &str) -> Result<StreamHandle, QueryError> {
        self.questions.lock().unwrap().push(question.to_string());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let events = self.scripts.lock().unwrap().pop_front().unwrap_or_default();
        Ok(StreamHandle::from_events(events))
    }
}

// ==================== Output ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputEvent {
    StreamStart,
    Fragment(String),
    StreamEnd,
    Failed(String),
    Render(usize),
}

#[derive(Default)]
pub(crate) struct RecordingOutput {
    events: Mutex<Vec<OutputEvent>>,
    last_render: Mutex<Vec<(Role, String)>>,
}

impl RecordingOutput {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn events(&self) -> Vec<OutputEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn fragments(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                OutputEvent::Fragment(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_render(&self) -> Vec<(Role, String)> {
        self.last_render.lock().unwrap().clone()
    }
}

impl ChatOutput for RecordingOutput {
    fn on_stream_start(&self) {
        self.events.lock().unwrap().push(OutputEvent::StreamStart);
    }

    fn on_fragment(&self, fragment: &str) {
        self.events
            .lock()
            .unwrap()
            .push(OutputEvent::Fragment(fragment.to_string()));
    }

    fn on_stream_end(&self) {
        self.events.lock().unwrap().push(OutputEvent::StreamEnd);
    }

    fn on_turn_failed(&self, reason: &str) {
        self.events
            .lock()
            .unwrap()
            .push(OutputEvent::Failed(reason.to_string()));
    }

    fn render(&self, turns: &[ChatTurn]) {
        self.events
            .lock()
            .unwrap()
            .push(OutputEvent::Render(turns.len()));
        *self.last_render.lock().unwrap() = turns
            .iter()
            .map(|t| (t.role(), t.content().to_string()))
            .collect();
    }
}

// ==================== Transcript ====================

#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingLogger {
    pub(crate) fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.kind).collect()
    }

    pub(crate) fn events(&self) -> Vec<ConversationEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub(crate) fn context_with(
    builder: Arc<CountingBuilder>,
    factory: Arc<ScriptedFactory>,
    config: SessionConfig,
) -> AppContext {
    AppContext::new(
        builder,
        factory,
        DocumentSource::new("./data/latex2e"),
        config,
    )
}
